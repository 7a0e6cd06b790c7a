//! Call Log Wire Models
//!
//! - ApiResponse: result of a simulated call
//! - Stats: aggregate counts and recent records

mod api_response;
mod stats;

pub use api_response::*;
pub use stats::*;
