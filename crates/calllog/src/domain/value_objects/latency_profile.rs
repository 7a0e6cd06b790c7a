//! Latency simulation ranges

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::ports::RandomSource;

/// Half-open range of delays in milliseconds: `[min_ms, max_ms)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    /// Build a range, rejecting empty or inverted bounds
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, DomainError> {
        if max_ms <= min_ms {
            return Err(DomainError::Validation(format!(
                "delay range must satisfy min < max (got {}..{})",
                min_ms, max_ms
            )));
        }
        if max_ms - min_ms > u64::from(u32::MAX) {
            return Err(DomainError::Validation(format!(
                "delay range {}..{} is too wide",
                min_ms, max_ms
            )));
        }
        Ok(Self { min_ms, max_ms })
    }

    /// Const constructor for known-good built-in ranges
    const fn fixed(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Width of the range
    pub fn span_ms(&self) -> u64 {
        self.max_ms - self.min_ms
    }

    /// Pick a delay uniformly from the range
    pub fn sample(&self, random: &dyn RandomSource) -> Duration {
        let span = u32::try_from(self.span_ms()).unwrap_or(u32::MAX);
        let offset = u64::from(random.next_below(span));
        Duration::from_millis(self.min_ms + offset)
    }
}

impl std::fmt::Display for DelayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}ms", self.min_ms, self.max_ms)
    }
}

/// Parses `"min..max"` (e.g. `"2000..5000"`)
impl std::str::FromStr for DelayRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .split_once("..")
            .ok_or_else(|| DomainError::Validation(format!("expected min..max, got '{}'", s)))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u64>()
                .map_err(|e| DomainError::Validation(format!("invalid delay '{}': {}", v, e)))
        };
        DelayRange::new(parse(min)?, parse(max)?)
    }
}

/// Delay ranges for every simulated behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyProfile {
    /// `/api/normal` wait
    pub normal: DelayRange,
    /// `/api/error` wait before the simulated failure
    pub error: DelayRange,
    /// Slow simulator
    pub slow: DelayRange,
    /// Fast simulator
    pub fast: DelayRange,
    /// `/api/random` behavior 1
    pub random_slow: DelayRange,
    /// `/api/random` behavior 2 when no failure is raised
    pub random_error_wait: DelayRange,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            normal: DelayRange::fixed(100, 300),
            error: DelayRange::fixed(50, 150),
            slow: DelayRange::fixed(2000, 5000),
            fast: DelayRange::fixed(10, 50),
            random_slow: DelayRange::fixed(500, 1500),
            random_error_wait: DelayRange::fixed(100, 400),
        }
    }
}

impl LatencyProfile {
    pub fn with_normal(mut self, range: DelayRange) -> Self {
        self.normal = range;
        self
    }

    pub fn with_error(mut self, range: DelayRange) -> Self {
        self.error = range;
        self
    }

    pub fn with_slow(mut self, range: DelayRange) -> Self {
        self.slow = range;
        self
    }

    pub fn with_fast(mut self, range: DelayRange) -> Self {
        self.fast = range;
        self
    }

    pub fn with_random_slow(mut self, range: DelayRange) -> Self {
        self.random_slow = range;
        self
    }

    pub fn with_random_error_wait(mut self, range: DelayRange) -> Self {
        self.random_error_wait = range;
        self
    }
}
