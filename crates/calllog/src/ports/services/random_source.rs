//! Random Source Port
//!
//! Every random decision (delays, branch selection, canned phrases)
//! goes through this trait so tests can pin outcomes.

/// Source of uniformly distributed integers
pub trait RandomSource: Send + Sync {
    /// Uniform value in `[0, bound)`. Returns 0 when `bound` is 0.
    fn next_below(&self, bound: u32) -> u32;

    /// Fair coin flip
    fn chance(&self) -> bool {
        self.next_below(2) == 1
    }
}
