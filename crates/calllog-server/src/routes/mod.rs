//! Call Log API Routes
//!
//! - /api/normal - Normal call (100-300ms)
//! - /api/error - Simulated failure (always 500)
//! - /api/slow - Slow call (2-5s)
//! - /api/fast - Fast call (10-50ms)
//! - /api/random - One of the above behaviors at random
//! - /api/stats - Counts per call type and recent history
//! - /api/calls - Stored records, optionally filtered by `?type=`
//! - /api/calls/count - Record count, optionally for one `?type=`

pub mod demo;
pub mod stats;
pub mod swagger;
