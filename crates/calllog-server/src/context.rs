//! Request-scoped correlation context
//!
//! Each handler builds one `RequestContext` and passes it to the service
//! layer. Correlation fields live on the context's tracing span, so every
//! log line emitted inside the request carries them.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts, HeaderMap, StatusCode},
};
use tokio_util::sync::CancellationToken;
use tracing::Span;
use uuid::Uuid;

use calllog::CallType;

/// Header used to propagate an incoming request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Latency above which a call misses its SLA
pub const SLA_THRESHOLD_MS: i64 = 2000;

const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");
const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
const UNKNOWN: &str = "unknown";

/// HTTP request attributes captured for logging
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub request_id: Uuid,
    pub method: String,
    pub uri: String,
    pub query: String,
    pub user_agent: String,
    /// Peer address when the server was started with connect info
    pub remote_addr: String,
    pub content_type: String,
}

impl RequestMeta {
    fn header_value(headers: &HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    fn from_parts(parts: &Parts) -> Self {
        let request_id = Self::header_value(&parts.headers, REQUEST_ID_HEADER)
            .and_then(|v| Uuid::parse_str(&v).ok())
            .unwrap_or_else(Uuid::new_v4);

        Self {
            request_id,
            method: parts.method.to_string(),
            uri: parts.uri.path().to_string(),
            query: parts.uri.query().unwrap_or_default().to_string(),
            user_agent: Self::header_value(&parts.headers, header::USER_AGENT)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            remote_addr: parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            content_type: Self::header_value(&parts.headers, header::CONTENT_TYPE)
                .unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Correlation context for one API call
pub struct RequestContext {
    pub call_type: CallType,
    pub operation: &'static str,
    started_at: Instant,
    cancel: CancellationToken,
    span: Span,
}

impl RequestContext {
    pub fn new(
        meta: RequestMeta,
        call_type: CallType,
        operation: &'static str,
        cancel: CancellationToken,
    ) -> Self {
        let span = tracing::info_span!(
            "api_call",
            service.name = SERVICE_NAME,
            service.version = SERVICE_VERSION,
            request.id = %meta.request_id,
            request.method = %meta.method,
            request.uri = %meta.uri,
            request.query_string = %meta.query,
            request.user_agent = %meta.user_agent,
            request.remote_addr = %meta.remote_addr,
            request.content_type = %meta.content_type,
            api.endpoint = call_type.endpoint(),
            api.call_type = call_type.as_str(),
            api.operation = operation,
            operation.duration_ms = tracing::field::Empty,
            response.status_code = tracing::field::Empty,
        );

        Self {
            call_type,
            operation,
            started_at: Instant::now(),
            cancel,
            span,
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn endpoint(&self) -> &'static str {
        self.call_type.endpoint()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Milliseconds since the context was created
    pub fn elapsed_ms(&self) -> i64 {
        i64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(i64::MAX)
    }

    /// Record completion metrics on the span and emit the completion log
    pub fn record_completion(&self, status: StatusCode, execution_time_ms: i64) {
        self.span.record("operation.duration_ms", execution_time_ms);
        self.span.record("response.status_code", status.as_u16());

        let outcome = if status.is_success() { "success" } else { "error" };
        tracing::info!(
            operation.status = outcome,
            performance.category = performance_category(execution_time_ms),
            sla.compliant = sla_compliant(execution_time_ms),
            sla.threshold_ms = SLA_THRESHOLD_MS,
            "{} completed with status {} in {}ms",
            self.operation,
            status.as_u16(),
            execution_time_ms
        );
    }
}

/// Coarse latency bucket attached to completion logs
pub fn performance_category(execution_time_ms: i64) -> &'static str {
    match execution_time_ms {
        ms if ms < 100 => "fast",
        ms if ms < 1000 => "normal",
        ms if ms < 5000 => "slow",
        _ => "very_slow",
    }
}

pub fn sla_compliant(execution_time_ms: i64) -> bool {
    execution_time_ms < SLA_THRESHOLD_MS
}
