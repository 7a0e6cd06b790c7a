//! CallRecord Repository Port
//!
//! Abstract interface for call log persistence operations.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, CallCounts, CallRecord, NewCallRecord};

/// Repository interface for CallRecord entities
///
/// Records are append-only: there is no update or delete.
#[async_trait]
pub trait CallRecordRepository: Send + Sync {
    /// Insert a record and return it with its assigned id
    async fn insert(&self, record: &NewCallRecord) -> Result<CallRecord, DomainError>;

    /// All records, newest first
    async fn find_all_newest_first(&self) -> Result<Vec<CallRecord>, DomainError>;

    /// Records whose call type matches exactly
    async fn find_by_call_type(&self, call_type: &str) -> Result<Vec<CallRecord>, DomainError>;

    /// Number of records with the given call type
    async fn count_by_call_type(&self, call_type: &str) -> Result<i64, DomainError>;

    /// Total number of records
    async fn count(&self) -> Result<i64, DomainError>;

    /// Counts for every stored call type, read in a single statement
    async fn count_grouped(&self) -> Result<CallCounts, DomainError>;
}
