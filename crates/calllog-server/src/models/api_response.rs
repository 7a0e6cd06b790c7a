//! ApiResponse - Body returned by the simulated endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use calllog::CallType;

/// Result of one simulated API call
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub message: String,
    #[schema(example = "NORMAL")]
    pub call_type: String,
    #[schema(example = "/api/normal")]
    pub endpoint: String,
    pub execution_time_ms: i64,
    /// Set when the response is built
    pub timestamp: DateTime<Utc>,
    pub success: bool,
}

impl ApiResponse {
    /// Successful response for the endpoint owning `call_type`
    pub fn new(message: impl Into<String>, call_type: CallType, execution_time_ms: i64) -> Self {
        Self {
            message: message.into(),
            call_type: call_type.as_str().to_string(),
            endpoint: call_type.endpoint().to_string(),
            execution_time_ms,
            timestamp: Utc::now(),
            success: true,
        }
    }

    /// Same as `new` with `success = false`
    pub fn failure(message: impl Into<String>, call_type: CallType, execution_time_ms: i64) -> Self {
        Self {
            success: false,
            ..Self::new(message, call_type, execution_time_ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_defaults() {
        let response = ApiResponse::new("ok", CallType::Fast, 12);
        assert!(response.success);
        assert_eq!(response.call_type, "FAST");
        assert_eq!(response.endpoint, "/api/fast");
    }

    #[test]
    fn test_failure_sets_flag_and_wire_names() {
        let response = ApiResponse::failure("boom", CallType::Error, 80);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["callType"], "ERROR");
        assert_eq!(json["executionTimeMs"], 80);
        assert!(json.get("timestamp").is_some());
    }
}
