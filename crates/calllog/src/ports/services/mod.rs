//! Service Ports
//!
//! Abstract interfaces for external capabilities.

mod random_source;

pub use random_source::*;
