//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{ApiResponse, CallCountResponse, CallRecordResponse, StatsResponse};
use crate::HealthCheck;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        // Demo endpoints
        super::demo::normal_call,
        super::demo::error_call,
        super::demo::slow_call,
        super::demo::fast_call,
        super::demo::random_call,
        // Stats endpoints
        super::stats::get_stats,
        super::stats::list_calls,
        super::stats::count_calls,
    ),
    info(
        title = "Call Log API",
        version = "0.1.0",
        description = "Demo service that simulates API calls with distinct latency and error profiles and logs every call to an embedded store.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Demo", description = "Simulated calls - normal, error, slow, fast, random"),
        (name = "Stats", description = "Stats - Counts and history from the call log"),
    ),
    components(
        schemas(
            HealthCheck,
            ApiResponse,
            CallRecordResponse,
            CallCountResponse,
            StatsResponse,
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/normal",
            "/api/error",
            "/api/slow",
            "/api/fast",
            "/api/random",
            "/api/stats",
            "/api/calls",
            "/api/calls/count",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_registers_response_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().unwrap().schemas;
        assert!(schemas.contains_key("ApiResponse"));
        assert!(schemas.contains_key("StatsResponse"));
    }
}
