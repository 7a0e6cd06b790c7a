//! Call Log Application Service (Use Case)
//!
//! Persists call records and runs the latency simulators.

use std::sync::Arc;
use std::time::{Duration, Instant};

use calllog::{
    CallCounts, CallRecord, CallRecordRepository, DelayRange, DomainError, LatencyProfile, NewCallRecord,
    RandomSource,
};

use crate::context::RequestContext;

/// Canned phrases returned by `/api/random`
pub const RANDOM_RESPONSES: [&str; 5] = [
    "Random data generated successfully",
    "Operation completed with random result",
    "Random processing finished",
    "Generated random output",
    "Random computation complete",
];

const TABLE: &str = "api_calls";

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Application service for call log operations
pub struct CallLogService<R: CallRecordRepository> {
    repo: Arc<R>,
    random: Arc<dyn RandomSource>,
    profile: LatencyProfile,
}

impl<R: CallRecordRepository> CallLogService<R> {
    pub fn new(repo: Arc<R>, random: Arc<dyn RandomSource>, profile: LatencyProfile) -> Self {
        Self {
            repo,
            random,
            profile,
        }
    }

    pub fn profile(&self) -> &LatencyProfile {
        &self.profile
    }

    /// Build and store a call record
    pub async fn save_api_call(
        &self,
        endpoint: &str,
        call_type: &str,
        message: impl Into<String>,
        execution_time_ms: i64,
    ) -> Result<CallRecord, DomainError> {
        let record = NewCallRecord::new(endpoint, call_type, message, execution_time_ms);
        let started = Instant::now();

        tracing::debug!(
            db.operation = "insert",
            db.table = TABLE,
            api.call.endpoint = endpoint,
            api.call.call_type = call_type,
            api.call.execution_time_ms = record.execution_time_ms,
            "Saving API call"
        );

        match self.repo.insert(&record).await {
            Ok(saved) => {
                tracing::debug!(
                    db.operation = "insert",
                    db.operation.status = "success",
                    db.operation.duration_ms = elapsed_ms(started),
                    db.record.id = saved.id,
                    db.record.size_estimate = saved.size_estimate(),
                    "API call saved with ID: {}",
                    saved.id
                );
                Ok(saved)
            }
            Err(e) => {
                tracing::error!(
                    db.operation = "insert",
                    db.operation.status = "error",
                    db.operation.duration_ms = elapsed_ms(started),
                    db.error.message = %e,
                    "Failed to save API call"
                );
                Err(e)
            }
        }
    }

    /// All records, newest first
    pub async fn get_all_api_calls(&self) -> Result<Vec<CallRecord>, DomainError> {
        let started = Instant::now();
        let results = self.repo.find_all_newest_first().await.inspect_err(|e| {
            tracing::error!(db.operation = "select", db.error.message = %e, "Failed to retrieve API calls");
        })?;

        tracing::debug!(
            db.operation = "select",
            db.query.kind = "find_all",
            db.query.result_count = results.len(),
            db.operation.duration_ms = elapsed_ms(started),
            "Retrieved {} API calls",
            results.len()
        );
        Ok(results)
    }

    /// Records with exactly this call type
    pub async fn get_api_calls_by_type(
        &self,
        call_type: &str,
    ) -> Result<Vec<CallRecord>, DomainError> {
        let started = Instant::now();
        let results = self.repo.find_by_call_type(call_type).await.inspect_err(|e| {
            tracing::error!(
                db.operation = "select",
                db.query.filter.call_type = call_type,
                db.error.message = %e,
                "Failed to retrieve API calls of type '{}'",
                call_type
            );
        })?;

        tracing::debug!(
            db.operation = "select",
            db.query.kind = "find_by_call_type",
            db.query.filter.call_type = call_type,
            db.query.result_count = results.len(),
            db.operation.duration_ms = elapsed_ms(started),
            "Retrieved {} API calls of type '{}'",
            results.len(),
            call_type
        );
        Ok(results)
    }

    /// Number of records with this call type (0 if none)
    pub async fn get_call_count_by_type(&self, call_type: &str) -> Result<i64, DomainError> {
        let count = self
            .repo
            .count_by_call_type(call_type)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    db.operation = "count",
                    db.query.filter.call_type = call_type,
                    db.error.message = %e,
                    "Failed to count API calls of type '{}'",
                    call_type
                );
            })?;
        tracing::debug!(
            db.operation = "count",
            db.query.filter.call_type = call_type,
            "Counted {} API calls of type '{}'",
            count,
            call_type
        );
        Ok(count)
    }

    pub async fn get_total_count(&self) -> Result<i64, DomainError> {
        self.repo.count().await.inspect_err(|e| {
            tracing::error!(db.operation = "count", db.error.message = %e, "Failed to count API calls");
        })
    }

    /// Counts for every call type, consistent with each other
    pub async fn get_call_counts(&self) -> Result<CallCounts, DomainError> {
        let started = Instant::now();
        let counts = self.repo.count_grouped().await.inspect_err(|e| {
            tracing::error!(
                db.operation = "count",
                db.query.kind = "group_by_call_type",
                db.error.message = %e,
                "Failed to count API calls by type"
            );
        })?;

        tracing::debug!(
            db.operation = "count",
            db.query.kind = "group_by_call_type",
            db.query.result_count = counts.total(),
            db.operation.duration_ms = elapsed_ms(started),
            "Counted {} API calls across all types",
            counts.total()
        );
        Ok(counts)
    }

    /// Wait a duration drawn from `range`, or until the request is cancelled
    pub async fn simulate_delay(
        &self,
        ctx: &RequestContext,
        range: DelayRange,
        kind: &'static str,
    ) -> Result<Duration, DomainError> {
        let delay = range.sample(self.random.as_ref());

        tracing::debug!(
            simulation.kind = kind,
            simulation.delay_ms = delay.as_millis() as u64,
            simulation.expected_range = %range,
            "Starting {} simulation with {}ms delay",
            kind,
            delay.as_millis()
        );

        tokio::select! {
            biased;
            _ = ctx.cancellation().cancelled() => {
                tracing::warn!(simulation.kind = kind, simulation.status = "interrupted", "{} simulation was interrupted", kind);
                Err(DomainError::Cancelled)
            }
            _ = tokio::time::sleep(delay) => {
                tracing::debug!(simulation.kind = kind, simulation.status = "completed", "{} simulation completed", kind);
                Ok(delay)
            }
        }
    }

    /// Slow database-like operation (2-5s by default)
    pub async fn simulate_slow_operation(
        &self,
        ctx: &RequestContext,
    ) -> Result<Duration, DomainError> {
        self.simulate_delay(ctx, self.profile.slow, "slow_operation")
            .await
    }

    /// Fast cache-like operation (10-50ms by default)
    pub async fn simulate_fast_operation(
        &self,
        ctx: &RequestContext,
    ) -> Result<Duration, DomainError> {
        self.simulate_delay(ctx, self.profile.fast, "fast_operation")
            .await
    }

    /// Uniform index in `[0, n)`
    pub fn pick(&self, n: u32) -> u32 {
        self.random.next_below(n)
    }

    /// Fair coin flip
    pub fn chance(&self) -> bool {
        self.random.chance()
    }

    pub fn generate_random_response(&self) -> &'static str {
        let index = self.pick(RANDOM_RESPONSES.len() as u32) as usize;
        let response = RANDOM_RESPONSES[index % RANDOM_RESPONSES.len()];
        tracing::debug!(
            response.generation.selected_index = index,
            response.generation.total_options = RANDOM_RESPONSES.len(),
            "Generated random response"
        );
        response
    }
}
