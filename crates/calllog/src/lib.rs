//! Call Log Domain Library
//!
//! Core domain types and interfaces for the call log demo service.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Persisted models (CallRecord, CallCounts)
//!   - `value_objects/`: Immutable value types (CallType, DelayRange, LatencyProfile)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: Randomness source used by the latency simulators
//!
//! # Usage
//!
//! ```rust,ignore
//! use calllog::{CallRecord, CallType, NewCallRecord};
//! use calllog::{CallRecordRepository, RandomSource};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CallCounts, CallRecord, CallType, DelayRange, DomainError, LatencyProfile, NewCallRecord,
};
pub use ports::{CallRecordRepository, RandomSource};
