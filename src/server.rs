//! Read-only HTTP API over the stored collection.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/collection` | All artifacts in client shape |
//! | `GET`  | `/api/collection/{id}` | One artifact |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! `GET /api/collection` keeps the flat body the browser client expects:
//!
//! ```json
//! { "error": "Failed to fetch collection" }
//! ```
//!
//! Other endpoints use a structured body:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "artifact not found: edanmdm:x" } }
//! ```
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so a static front end
//! can be hosted separately.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::collection::{to_collection, CollectionItem};
use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;
use crate::traits::ArtifactStore;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    store: Arc<dyn ArtifactStore>,
}

/// Starts the HTTP server on `[server].bind` backed by the SQLite store.
///
/// Runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    let store: Arc<dyn ArtifactStore> = Arc::new(SqliteStore::new(pool));

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "collection server listening");
    println!("Collection server listening on http://{}", config.server.bind);

    axum::serve(listener, router(store)).await?;
    Ok(())
}

/// Builds the router over any [`ArtifactStore`].
pub fn router(store: Arc<dyn ArtifactStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/collection", get(handle_collection))
        .route("/api/collection/{id}", get(handle_artifact))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(AppState { store })
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /api/collection ============

async fn handle_collection(State(state): State<AppState>) -> Response {
    match state.store.list_artifacts().await {
        Ok(records) => Json(to_collection(records)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "error fetching collection");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to fetch collection" })),
            )
                .into_response()
        }
    }
}

// ============ GET /api/collection/{id} ============

async fn handle_artifact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CollectionItem>, AppError> {
    let record = state.store.get_artifact(&id).await.map_err(|e| {
        tracing::error!(error = %e, id = %id, "error fetching artifact");
        internal("failed to fetch artifact")
    })?;

    record
        .map(|r| Json(CollectionItem::from(r)))
        .ok_or_else(|| not_found(format!("artifact not found: {}", id)))
}
