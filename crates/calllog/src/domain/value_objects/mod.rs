//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod call_type;
mod latency_profile;

pub use call_type::*;
pub use latency_profile::*;
