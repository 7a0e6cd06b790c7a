//! Domain Entities
//!
//! - CallRecord: one persisted row per simulated API invocation
//! - CallCounts: per-type record counts from one snapshot

mod call_counts;
mod call_record;

pub use call_counts::*;
pub use call_record::*;
