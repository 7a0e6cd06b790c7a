//! Stats DTOs - Aggregate view over stored call records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use calllog::CallRecord;

/// Number of records included in `recentCalls`
pub const RECENT_CALLS_LIMIT: usize = 10;

/// Stored call record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallRecordResponse {
    pub id: i64,
    pub endpoint: String,
    pub call_type: String,
    pub response_message: String,
    pub execution_time_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl From<CallRecord> for CallRecordResponse {
    fn from(record: CallRecord) -> Self {
        Self {
            id: record.id,
            endpoint: record.endpoint,
            call_type: record.call_type,
            response_message: record.response_message,
            execution_time_ms: record.execution_time_ms,
            created_at: record.created_at,
        }
    }
}

/// Stats response - counts per call type plus the most recent calls
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Row count after this call's own STATS record was written
    pub total_calls: i64,
    pub normal_calls: i64,
    pub error_calls: i64,
    pub slow_calls: i64,
    pub fast_calls: i64,
    pub random_calls: i64,
    pub stats_calls: i64,
    /// Newest first, at most ten
    pub recent_calls: Vec<CallRecordResponse>,
    pub execution_time_ms: i64,
}

/// Number of stored calls, optionally for one call type
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallCountResponse {
    /// Filter that was applied; absent for the total
    pub call_type: Option<String>,
    pub count: i64,
}

/// Query for listing stored calls
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCallsQuery {
    /// Exact call type to filter by (e.g. `FAST`)
    #[serde(rename = "type")]
    pub call_type: Option<String>,
}
