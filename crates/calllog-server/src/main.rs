use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use calllog::{CallType, RandomSource};

mod adapters;
mod application;
mod config;
mod context;
mod models;
mod routes;
mod telemetry;
#[cfg(test)]
mod test_support;

use adapters::{sqlite, SqliteCallRecordRepository, StdRandomSource};
use application::CallLogService;
use config::ServerConfig;
use context::{RequestContext, RequestMeta};

/// Call log service bound to the SQLite repository
pub type AppCallLogService = CallLogService<SqliteCallRecordRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub call_log_service: Arc<AppCallLogService>,
    /// Cancelled on shutdown; every request waits on a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn request_context(
        &self,
        meta: RequestMeta,
        call_type: CallType,
        operation: &'static str,
    ) -> RequestContext {
        RequestContext::new(meta, call_type, operation, self.shutdown.child_token())
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthCheck {
    status: String,
    message: String,
    version: String,
    /// `ok` when the store answers a trivial query
    database: String,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is running", body = HealthCheck)),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheck> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "ok".to_string(),
        Err(e) => {
            tracing::warn!("⚠️  Health check could not reach the database: {}", e);
            "unavailable".to_string()
        }
    };

    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Call Log API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}

pub fn build_router(state: AppState) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::demo::router())
        .merge(routes::stats::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn shutdown_signal(token: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("🛑 Shutdown requested - cancelling in-flight simulations");
    token.cancel();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    telemetry::init_telemetry(&config.telemetry())?;

    tracing::info!("📞 Call Log API initializing...");

    let pool = sqlite::connect(&config.database_url).await?;
    tracing::info!("✅ Database ready ({})", config.database_url);

    let random: Arc<dyn RandomSource> = match config.random_seed {
        Some(seed) => {
            tracing::info!("🎲 Random source seeded with {}", seed);
            Arc::new(StdRandomSource::from_seed(seed))
        }
        None => Arc::new(StdRandomSource::from_entropy()),
    };

    let repo = Arc::new(SqliteCallRecordRepository::new(pool.clone()));
    let call_log_service = Arc::new(CallLogService::new(repo, random, config.latency.clone()));

    let shutdown = CancellationToken::new();
    let state = AppState {
        pool,
        call_log_service,
        shutdown: shutdown.clone(),
    };

    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Call Log API listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown))
    .await?;

    tracing::info!("👋 Call Log API stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::test_support::{get_json, quick_profile, test_state, ScriptedRandom};

    #[tokio::test]
    async fn test_health_reports_database() {
        let state = test_state(quick_profile(), ScriptedRandom::new([])).await;
        let router = build_router(state.clone());

        let (status, body) = get_json(&router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "ok");

        state.pool.close().await;
        let (status, body) = get_json(&router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "unavailable");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let state = test_state(quick_profile(), ScriptedRandom::new([])).await;
        let router = build_router(state);

        let (status, body) = get_json(&router, "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "Call Log API");
        assert!(body["paths"].get("/api/stats").is_some());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let state = test_state(quick_profile(), ScriptedRandom::new([])).await;
        let router = build_router(state);

        let (status, _) = get_json(&router, "/api/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
