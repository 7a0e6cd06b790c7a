//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and the latency simulators.

mod call_log_service;

pub use call_log_service::CallLogService;

#[cfg(test)]
pub use call_log_service::RANDOM_RESPONSES;
