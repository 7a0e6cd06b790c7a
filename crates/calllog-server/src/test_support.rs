//! Shared fixtures for unit and router tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tokio_util::sync::CancellationToken;
use tower::util::ServiceExt;

use calllog::{CallType, DelayRange, LatencyProfile, RandomSource};

use crate::adapters::{sqlite, SqliteCallRecordRepository};
use crate::application::CallLogService;
use crate::context::{RequestContext, RequestMeta};
use crate::AppState;

/// RandomSource that replays a fixed script, then yields 0
pub struct ScriptedRandom {
    values: Mutex<VecDeque<u32>>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_below(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        let next = self.values.lock().unwrap().pop_front().unwrap_or(0);
        next % bound
    }
}

/// Short delays so router tests stay quick
pub fn quick_profile() -> LatencyProfile {
    LatencyProfile::default()
        .with_normal(DelayRange::new(5, 10).unwrap())
        .with_error(DelayRange::new(5, 10).unwrap())
        .with_slow(DelayRange::new(20, 30).unwrap())
        .with_fast(DelayRange::new(1, 5).unwrap())
        .with_random_slow(DelayRange::new(10, 15).unwrap())
        .with_random_error_wait(DelayRange::new(5, 10).unwrap())
}

pub async fn test_state(
    profile: LatencyProfile,
    random: impl RandomSource + 'static,
) -> AppState {
    let pool = sqlite::connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    let repo = Arc::new(SqliteCallRecordRepository::new(pool.clone()));
    let service = CallLogService::new(repo, Arc::new(random), profile);

    AppState {
        pool,
        call_log_service: Arc::new(service),
        shutdown: CancellationToken::new(),
    }
}

pub fn test_context(call_type: CallType, cancel: CancellationToken) -> RequestContext {
    let meta = RequestMeta {
        request_id: uuid::Uuid::new_v4(),
        method: "GET".to_string(),
        uri: call_type.endpoint().to_string(),
        query: String::new(),
        user_agent: "test".to_string(),
        remote_addr: "127.0.0.1:0".to_string(),
        content_type: "unknown".to_string(),
    };
    RequestContext::new(meta, call_type, "test_call", cancel)
}

/// Issue a GET against the router and decode the JSON body
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}
