//! Stats Routes - Aggregate view over the call log

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::Instrument;

use calllog::{CallType, DomainError};

use crate::context::{RequestContext, RequestMeta};
use crate::models::{
    ApiResponse, CallCountResponse, CallRecordResponse, ListCallsQuery, StatsResponse,
    RECENT_CALLS_LIMIT,
};
use crate::AppState;

/// Fetch the listing, log this call, then count.
///
/// Counts are taken after the STATS record is written, so they include it.
/// All counts come from one grouped query, so the per-type fields and the
/// total describe the same snapshot even while other calls are writing.
/// `recent_calls` comes from the listing taken before the write.
async fn collect_stats(
    state: &AppState,
    ctx: &RequestContext,
) -> Result<StatsResponse, DomainError> {
    let service = &state.call_log_service;

    let all_calls = service.get_all_api_calls().await?;
    let elapsed = ctx.elapsed_ms();

    service
        .save_api_call(
            ctx.endpoint(),
            CallType::Stats.as_str(),
            format!("Retrieved {} records", all_calls.len()),
            elapsed,
        )
        .await?;

    let counts = service.get_call_counts().await?;
    let count = |call_type: CallType| counts.get(call_type.as_str());

    let stats = StatsResponse {
        total_calls: counts.total(),
        normal_calls: count(CallType::Normal),
        error_calls: count(CallType::Error),
        slow_calls: count(CallType::Slow),
        fast_calls: count(CallType::Fast),
        random_calls: count(CallType::Random),
        stats_calls: count(CallType::Stats),
        recent_calls: all_calls
            .into_iter()
            .take(RECENT_CALLS_LIMIT)
            .map(CallRecordResponse::from)
            .collect(),
        execution_time_ms: elapsed,
    };

    tracing::info!(
        stats.total_calls = stats.total_calls,
        stats.recent_calls = stats.recent_calls.len(),
        "Stats retrieved in {}ms",
        elapsed
    );
    Ok(stats)
}

/// Call statistics
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Counts per call type and the ten most recent calls", body = StatsResponse),
        (status = 500, description = "Store unavailable", body = ApiResponse)
    ),
    tag = "Stats"
)]
pub async fn get_stats(
    State(state): State<AppState>,
    meta: RequestMeta,
) -> Result<Json<StatsResponse>, (StatusCode, Json<ApiResponse>)> {
    let ctx = state.request_context(meta, CallType::Stats, "get_stats");
    let span = ctx.span().clone();

    async move {
        match collect_stats(&state, &ctx).await {
            Ok(stats) => {
                ctx.record_completion(StatusCode::OK, stats.execution_time_ms);
                Ok(Json(stats))
            }
            Err(e) => {
                let elapsed = ctx.elapsed_ms();
                tracing::error!(error.message = %e, "Failed to retrieve stats");
                ctx.record_completion(StatusCode::INTERNAL_SERVER_ERROR, elapsed);
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::failure(
                        format!("Failed to retrieve stats: {}", e),
                        CallType::Stats,
                        elapsed,
                    )),
                ))
            }
        }
    }
    .instrument(span)
    .await
}

/// List stored calls, newest first, optionally filtered by type
#[utoipa::path(
    get,
    path = "/api/calls",
    params(ListCallsQuery),
    responses(
        (status = 200, description = "Stored call records", body = Vec<CallRecordResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Stats"
)]
pub async fn list_calls(
    State(state): State<AppState>,
    Query(query): Query<ListCallsQuery>,
) -> Result<Json<Vec<CallRecordResponse>>, (StatusCode, String)> {
    let service = &state.call_log_service;

    let records = match query.call_type.as_deref() {
        Some(call_type) => service.get_api_calls_by_type(call_type).await,
        None => service.get_all_api_calls().await,
    }
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(
        records.into_iter().map(CallRecordResponse::from).collect(),
    ))
}

/// Count stored calls, optionally for one exact call type
#[utoipa::path(
    get,
    path = "/api/calls/count",
    params(ListCallsQuery),
    responses(
        (status = 200, description = "Number of stored call records", body = CallCountResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Stats"
)]
pub async fn count_calls(
    State(state): State<AppState>,
    Query(query): Query<ListCallsQuery>,
) -> Result<Json<CallCountResponse>, (StatusCode, String)> {
    let service = &state.call_log_service;

    let count = match query.call_type.as_deref() {
        Some(call_type) => service.get_call_count_by_type(call_type).await,
        None => service.get_total_count().await,
    }
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(CallCountResponse {
        call_type: query.call_type,
        count,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stats", get(get_stats))
        .route("/api/calls", get(list_calls))
        .route("/api/calls/count", get(count_calls))
}
