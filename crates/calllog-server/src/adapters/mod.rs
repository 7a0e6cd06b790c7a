//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod random;
pub mod sqlite;

// Re-exports
pub use random::StdRandomSource;
pub use sqlite::SqliteCallRecordRepository;
