//! Demo Routes - Simulated latency and error profiles
//!
//! Each handler builds a `RequestContext`, runs its simulated behavior
//! inside the context's span, persists one call record and responds.
//! A cancelled wait responds 500 without persisting anything.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::Instrument;

use calllog::{CallType, DomainError};

use crate::context::{RequestContext, RequestMeta};
use crate::models::ApiResponse;
use crate::AppState;

/// `/api/slow` logs a warning above this latency
const SLOW_WARN_THRESHOLD_MS: i64 = 1000;

/// Failure raised by `/api/random` behavior 2
const RANDOM_ERROR: &str = "Random error occurred";

type Reply = (StatusCode, Json<ApiResponse>);

/// Suffix naming the `/api/random` behavior, empty for other endpoints
fn behavior_suffix(behavior: Option<u32>) -> String {
    behavior
        .map(|b| format!(" (behavior: {})", b))
        .unwrap_or_default()
}

fn failure_body(ctx: &RequestContext, err: &DomainError, behavior: Option<u32>) -> ApiResponse {
    let elapsed = ctx.elapsed_ms();
    let label = ctx.call_type.label();
    let suffix = behavior_suffix(behavior);

    let (category, severity, message) = match err {
        DomainError::Cancelled => (
            "interruption",
            "low",
            format!("{} call cancelled after {}ms{}", label, elapsed, suffix),
        ),
        DomainError::Repository(_) => (
            "persistence",
            "high",
            format!("Failed to persist call record: {}{}", err, suffix),
        ),
        DomainError::Validation(_) => (
            "unexpected",
            "high",
            format!("{} call failed: {}{}", label, err, suffix),
        ),
    };

    tracing::error!(
        error.category = category,
        error.severity = severity,
        error.message = %err,
        error.occurred = true,
        "{} API call failed after {}ms",
        label,
        elapsed
    );

    ApiResponse::failure(message, ctx.call_type, elapsed)
}

/// Turn a flow result into the HTTP reply and log completion metrics
fn finish(
    ctx: &RequestContext,
    result: Result<Reply, DomainError>,
    behavior: Option<u32>,
) -> Reply {
    let (status, Json(body)) = result.unwrap_or_else(|err| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(failure_body(ctx, &err, behavior)),
        )
    });
    ctx.record_completion(status, body.execution_time_ms);
    (status, Json(body))
}

async fn run_normal(state: &AppState, ctx: &RequestContext) -> Result<Reply, DomainError> {
    let service = &state.call_log_service;
    service
        .simulate_delay(ctx, service.profile().normal, "normal_call")
        .await?;

    let elapsed = ctx.elapsed_ms();
    let message = "Normal API call executed successfully";
    service
        .save_api_call(ctx.endpoint(), CallType::Normal.as_str(), message, elapsed)
        .await?;

    tracing::info!("Normal API call completed successfully in {}ms", elapsed);
    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(message, CallType::Normal, elapsed)),
    ))
}

async fn run_error(state: &AppState, ctx: &RequestContext) -> Result<Reply, DomainError> {
    let service = &state.call_log_service;
    service
        .simulate_delay(ctx, service.profile().error, "error_call")
        .await?;

    let elapsed = ctx.elapsed_ms();
    let message = "Simulated error occurred during processing";
    service
        .save_api_call(ctx.endpoint(), CallType::Error.as_str(), message, elapsed)
        .await?;

    tracing::warn!(
        error.simulated = true,
        error.kind = "SimulatedBusinessError",
        error.category = "business_logic",
        error.severity = "medium",
        "Simulated error API call completed in {}ms",
        elapsed
    );
    Ok((
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::failure(message, CallType::Error, elapsed)),
    ))
}

async fn run_slow(state: &AppState, ctx: &RequestContext) -> Result<Reply, DomainError> {
    let service = &state.call_log_service;
    service.simulate_slow_operation(ctx).await?;

    let elapsed = ctx.elapsed_ms();
    let message = format!("Slow API call completed after {}ms", elapsed);
    service
        .save_api_call(ctx.endpoint(), CallType::Slow.as_str(), message.as_str(), elapsed)
        .await?;

    if elapsed > SLOW_WARN_THRESHOLD_MS {
        tracing::warn!(
            "Slow API call took {}ms - performance issue detected",
            elapsed
        );
    } else {
        tracing::info!("Slow API call completed in {}ms", elapsed);
    }

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(message, CallType::Slow, elapsed)),
    ))
}

async fn run_fast(state: &AppState, ctx: &RequestContext) -> Result<Reply, DomainError> {
    let service = &state.call_log_service;
    service.simulate_fast_operation(ctx).await?;

    let elapsed = ctx.elapsed_ms();
    let message = format!("Fast API call completed in {}ms", elapsed);
    service
        .save_api_call(ctx.endpoint(), CallType::Fast.as_str(), message.as_str(), elapsed)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(message, CallType::Fast, elapsed)),
    ))
}

async fn run_random(
    state: &AppState,
    ctx: &RequestContext,
    behavior: u32,
) -> Result<Reply, DomainError> {
    let service = &state.call_log_service;
    let profile = service.profile();

    let failure = match behavior {
        0 => {
            service.simulate_fast_operation(ctx).await?;
            None
        }
        1 => {
            service
                .simulate_delay(ctx, profile.random_slow, "random_slow")
                .await?;
            None
        }
        _ if service.chance() => Some(RANDOM_ERROR),
        _ => {
            service
                .simulate_delay(ctx, profile.random_error_wait, "random_error_wait")
                .await?;
            None
        }
    };

    let elapsed = ctx.elapsed_ms();
    match failure {
        None => {
            let message = format!(
                "{} (behavior: {})",
                service.generate_random_response(),
                behavior
            );
            service
                .save_api_call(ctx.endpoint(), CallType::Random.as_str(), message.as_str(), elapsed)
                .await?;

            tracing::info!(
                "Random API call completed with behavior {} in {}ms",
                behavior,
                elapsed
            );
            Ok((
                StatusCode::OK,
                Json(ApiResponse::new(message, CallType::Random, elapsed)),
            ))
        }
        Some(reason) => {
            let message = format!("Random call failed: {} (behavior: {})", reason, behavior);
            service
                .save_api_call(ctx.endpoint(), CallType::Random.as_str(), message.as_str(), elapsed)
                .await?;

            tracing::error!(
                error.category = "business_logic",
                error.severity = "medium",
                error.message = reason,
                "Random API call failed after {}ms: {}",
                elapsed,
                reason
            );
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(message, CallType::Random, elapsed)),
            ))
        }
    }
}

/// Normal call (100-300ms)
#[utoipa::path(
    get,
    path = "/api/normal",
    responses(
        (status = 200, description = "Call completed", body = ApiResponse),
        (status = 500, description = "Call cancelled or not persisted", body = ApiResponse)
    ),
    tag = "Demo"
)]
pub async fn normal_call(State(state): State<AppState>, meta: RequestMeta) -> Reply {
    let ctx = state.request_context(meta, CallType::Normal, "normal_call");
    let span = ctx.span().clone();

    async move {
        tracing::info!(
            business.operation_type = "data_retrieval",
            business.expected_duration_ms = 200,
            "Normal API call started"
        );
        let result = run_normal(&state, &ctx).await;
        finish(&ctx, result, None)
    }
    .instrument(span)
    .await
}

/// Error call - always responds 500
#[utoipa::path(
    get,
    path = "/api/error",
    responses(
        (status = 500, description = "Simulated error (always)", body = ApiResponse)
    ),
    tag = "Demo"
)]
pub async fn error_call(State(state): State<AppState>, meta: RequestMeta) -> Reply {
    let ctx = state.request_context(meta, CallType::Error, "error_call");
    let span = ctx.span().clone();

    async move {
        tracing::info!(
            business.operation_type = "error_simulation",
            business.expected_outcome = "error",
            "Error API call started (simulated error scenario)"
        );
        let result = run_error(&state, &ctx).await;
        finish(&ctx, result, None)
    }
    .instrument(span)
    .await
}

/// Slow call (2-5s)
#[utoipa::path(
    get,
    path = "/api/slow",
    responses(
        (status = 200, description = "Call completed", body = ApiResponse),
        (status = 500, description = "Call cancelled or not persisted", body = ApiResponse)
    ),
    tag = "Demo"
)]
pub async fn slow_call(State(state): State<AppState>, meta: RequestMeta) -> Reply {
    let ctx = state.request_context(meta, CallType::Slow, "slow_call");
    let span = ctx.span().clone();

    async move {
        tracing::info!("Slow API call started");
        let result = run_slow(&state, &ctx).await;
        finish(&ctx, result, None)
    }
    .instrument(span)
    .await
}

/// Fast call (10-50ms)
#[utoipa::path(
    get,
    path = "/api/fast",
    responses(
        (status = 200, description = "Call completed", body = ApiResponse),
        (status = 500, description = "Call cancelled or not persisted", body = ApiResponse)
    ),
    tag = "Demo"
)]
pub async fn fast_call(State(state): State<AppState>, meta: RequestMeta) -> Reply {
    let ctx = state.request_context(meta, CallType::Fast, "fast_call");
    let span = ctx.span().clone();

    async move {
        let result = run_fast(&state, &ctx).await;
        finish(&ctx, result, None)
    }
    .instrument(span)
    .await
}

/// Random call - fast, slow, or a 50% chance of failing
#[utoipa::path(
    get,
    path = "/api/random",
    responses(
        (status = 200, description = "Call completed", body = ApiResponse),
        (status = 500, description = "Random failure, cancellation or persistence failure", body = ApiResponse)
    ),
    tag = "Demo"
)]
pub async fn random_call(State(state): State<AppState>, meta: RequestMeta) -> Reply {
    let ctx = state.request_context(meta, CallType::Random, "random_call");
    let span = ctx.span().clone();

    async move {
        tracing::info!("Random API call started");
        let behavior = state.call_log_service.pick(3);
        tracing::debug!(random.behavior = behavior, "Random behavior selected: {}", behavior);

        let result = run_random(&state, &ctx, behavior).await;
        finish(&ctx, result, Some(behavior))
    }
    .instrument(span)
    .await
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/normal", get(normal_call))
        .route("/api/error", get(error_call))
        .route("/api/slow", get(slow_call))
        .route("/api/fast", get(fast_call))
        .route("/api/random", get(random_call))
}

#[cfg(test)]
mod tests {
    use calllog::LatencyProfile;

    use crate::application::RANDOM_RESPONSES;
    use crate::build_router;
    use crate::test_support::{get_json, quick_profile, test_state, ScriptedRandom};

    use super::*;

    async fn count(state: &AppState, call_type: CallType) -> i64 {
        state
            .call_log_service
            .get_call_count_by_type(call_type.as_str())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn normal_call_waits_and_persists_one_record() {
        let state = test_state(LatencyProfile::default(), ScriptedRandom::new([0])).await;
        let router = build_router(state.clone());

        let (status, body) = get_json(&router, "/api/normal").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["callType"], "NORMAL");
        assert_eq!(body["endpoint"], "/api/normal");
        assert_eq!(body["message"], "Normal API call executed successfully");
        let elapsed = body["executionTimeMs"].as_i64().unwrap();
        assert!((100..300).contains(&elapsed), "elapsed {}ms", elapsed);

        let records = state
            .call_log_service
            .get_api_calls_by_type("NORMAL")
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].endpoint, "/api/normal");
        assert_eq!(records[0].execution_time_ms, elapsed);
    }

    #[tokio::test]
    async fn error_call_always_fails_and_still_persists() {
        let state = test_state(quick_profile(), ScriptedRandom::new([])).await;
        let router = build_router(state.clone());

        for _ in 0..3 {
            let (status, body) = get_json(&router, "/api/error").await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["success"], false);
            assert_eq!(body["callType"], "ERROR");
            assert_eq!(body["message"], "Simulated error occurred during processing");
        }

        assert_eq!(count(&state, CallType::Error).await, 3);
    }

    #[tokio::test]
    async fn slow_call_embeds_elapsed_in_message() {
        let state = test_state(quick_profile(), ScriptedRandom::new([])).await;
        let router = build_router(state.clone());

        let (status, body) = get_json(&router, "/api/slow").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["callType"], "SLOW");
        let elapsed = body["executionTimeMs"].as_i64().unwrap();
        assert!(elapsed >= 20);
        assert_eq!(
            body["message"],
            format!("Slow API call completed after {}ms", elapsed)
        );
        assert_eq!(count(&state, CallType::Slow).await, 1);
    }

    #[tokio::test]
    async fn fast_call_is_faster_than_slow_call() {
        let state = test_state(quick_profile(), ScriptedRandom::new([])).await;
        let router = build_router(state.clone());

        let (fast_status, fast) = get_json(&router, "/api/fast").await;
        let (_, slow) = get_json(&router, "/api/slow").await;

        assert_eq!(fast_status, StatusCode::OK);
        assert_eq!(fast["callType"], "FAST");
        assert!(fast["executionTimeMs"].as_i64().unwrap() >= 0);
        assert!(fast["executionTimeMs"].as_i64() < slow["executionTimeMs"].as_i64());
        assert_eq!(count(&state, CallType::Fast).await, 1);
    }

    #[tokio::test]
    async fn random_call_fast_branch() {
        let state = test_state(quick_profile(), ScriptedRandom::new([0, 0, 3])).await;
        let router = build_router(state.clone());

        let (status, body) = get_json(&router, "/api/random").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["callType"], "RANDOM");
        assert_eq!(
            body["message"],
            format!("{} (behavior: 0)", RANDOM_RESPONSES[3])
        );
        assert_eq!(count(&state, CallType::Random).await, 1);
    }

    #[tokio::test]
    async fn random_call_slow_branch() {
        let state = test_state(quick_profile(), ScriptedRandom::new([1, 0, 0])).await;
        let router = build_router(state);

        let (status, body) = get_json(&router, "/api/random").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["executionTimeMs"].as_i64().unwrap() >= 10);
        assert_eq!(
            body["message"],
            format!("{} (behavior: 1)", RANDOM_RESPONSES[0])
        );
    }

    #[tokio::test]
    async fn random_call_error_branch_persists_failure() {
        let state = test_state(quick_profile(), ScriptedRandom::new([2, 1])).await;
        let router = build_router(state.clone());

        let (status, body) = get_json(&router, "/api/random").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "Random call failed: Random error occurred (behavior: 2)"
        );

        let records = state
            .call_log_service
            .get_api_calls_by_type("RANDOM")
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].response_message, body["message"]);
    }

    #[tokio::test]
    async fn random_call_error_branch_can_wait_instead() {
        let state = test_state(quick_profile(), ScriptedRandom::new([2, 0, 0, 1])).await;
        let router = build_router(state);

        let (status, body) = get_json(&router, "/api/random").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            format!("{} (behavior: 2)", RANDOM_RESPONSES[1])
        );
    }

    #[tokio::test]
    async fn cancelled_call_responds_500_without_record() {
        let state = test_state(LatencyProfile::default(), ScriptedRandom::new([])).await;
        state.shutdown.cancel();
        let router = build_router(state.clone());

        for uri in [
            "/api/normal",
            "/api/error",
            "/api/slow",
            "/api/fast",
            "/api/random",
        ] {
            let (status, body) = get_json(&router, uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["success"], false);
            assert!(
                body["message"].as_str().unwrap().contains("call cancelled after"),
                "{}: {}",
                uri,
                body["message"]
            );
        }

        assert_eq!(state.call_log_service.get_total_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn persistence_failure_is_distinct_500() {
        let state = test_state(quick_profile(), ScriptedRandom::new([])).await;
        let router = build_router(state.clone());
        state.pool.close().await;

        let (status, body) = get_json(&router, "/api/fast").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["callType"], "FAST");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to persist call record: "));
    }

    #[tokio::test]
    async fn cancelled_random_call_names_its_behavior() {
        let state = test_state(LatencyProfile::default(), ScriptedRandom::new([1])).await;
        state.shutdown.cancel();
        let router = build_router(state.clone());

        let (status, body) = get_json(&router, "/api/random").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["callType"], "RANDOM");
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Random call cancelled after "), "{}", message);
        assert!(message.ends_with("ms (behavior: 1)"), "{}", message);
        assert_eq!(count(&state, CallType::Random).await, 0);
    }

    #[tokio::test]
    async fn random_persistence_failure_names_its_behavior() {
        let state = test_state(quick_profile(), ScriptedRandom::new([0])).await;
        let router = build_router(state.clone());
        state.pool.close().await;

        let (status, body) = get_json(&router, "/api/random").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Failed to persist call record: "), "{}", message);
        assert!(message.ends_with(" (behavior: 0)"), "{}", message);
    }

    #[test]
    fn behavior_suffix_only_for_random() {
        assert_eq!(behavior_suffix(None), "");
        assert_eq!(behavior_suffix(Some(2)), " (behavior: 2)");
    }
}
