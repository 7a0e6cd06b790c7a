//! CallRecord - Persisted log of a single simulated API call
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed per-row overhead (id, timestamp) added to size estimates
const RECORD_OVERHEAD_BYTES: usize = 32;

/// CallRecord - A stored call log row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    /// Store-assigned identifier, increasing with each insert
    pub id: i64,
    /// Path that produced the record (e.g. `/api/normal`)
    pub endpoint: String,
    /// Call type label; open string so unknown labels can still be stored
    pub call_type: String,
    /// Outcome description
    pub response_message: String,
    /// Elapsed time measured by the caller
    pub execution_time_ms: i64,
    /// When the record was constructed
    pub created_at: DateTime<Utc>,
}

impl CallRecord {
    /// Rough storage footprint, used for log fields only
    pub fn size_estimate(&self) -> usize {
        self.endpoint.len()
            + self.call_type.len()
            + self.response_message.len()
            + RECORD_OVERHEAD_BYTES
    }
}

/// A call record that has not been written to the store yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewCallRecord {
    pub endpoint: String,
    pub call_type: String,
    pub response_message: String,
    pub execution_time_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl NewCallRecord {
    /// Create a new record stamped with the current time.
    ///
    /// Negative elapsed times are clamped to zero.
    pub fn new(
        endpoint: impl Into<String>,
        call_type: impl Into<String>,
        response_message: impl Into<String>,
        execution_time_ms: i64,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            call_type: call_type.into(),
            response_message: response_message.into(),
            execution_time_ms: execution_time_ms.max(0),
            created_at: Utc::now(),
        }
    }

    /// Attach the store-assigned id
    pub fn into_record(self, id: i64) -> CallRecord {
        CallRecord {
            id,
            endpoint: self.endpoint,
            call_type: self.call_type,
            response_message: self.response_message,
            execution_time_ms: self.execution_time_ms,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_keeps_fields() {
        let before = Utc::now();
        let record = NewCallRecord::new("/test", "TEST", "Test message", 100);

        assert_eq!(record.endpoint, "/test");
        assert_eq!(record.call_type, "TEST");
        assert_eq!(record.response_message, "Test message");
        assert_eq!(record.execution_time_ms, 100);
        assert!(record.created_at >= before);
    }

    #[test]
    fn test_negative_elapsed_is_clamped() {
        let record = NewCallRecord::new("/test", "TEST", "m", -5);
        assert_eq!(record.execution_time_ms, 0);
    }

    #[test]
    fn test_into_record_preserves_timestamp() {
        let new = NewCallRecord::new("/x", "T", "m", 42);
        let created_at = new.created_at;
        let record = new.into_record(7);

        assert_eq!(record.id, 7);
        assert_eq!(record.created_at, created_at);
        assert_eq!(record.size_estimate(), 2 + 1 + 1 + 32);
    }

    #[test]
    fn test_serializes_camel_case() {
        let record = NewCallRecord::new("/api/fast", "FAST", "ok", 12).into_record(1);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["callType"], "FAST");
        assert_eq!(json["responseMessage"], "ok");
        assert_eq!(json["executionTimeMs"], 12);
        assert!(json.get("createdAt").is_some());
    }
}
