//! REST API endpoints.
//!
//! Axum-based HTTP API for uploading submission logs and querying the
//! derived dashboard views of each upload session.

pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::models::SessionId;
use crate::storage::StorageError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Parse a session id from a path segment.
pub fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid session id: {}", raw)))
}

/// Run CPU-bound work over a table off the async runtime.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("Worker task failed: {}", e)))
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }

    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any origin", origin);
            layer.allow_origin(Any)
        }
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    use routes::{data, sessions, system, views};

    let body_limit = state.server.max_upload_bytes;
    let cors = cors_layer(&state.server.cors_origin);

    Router::new()
        .route("/api/health", get(system::health))
        .route("/api/format", get(system::expected_format))
        .route("/api/sessions", post(sessions::create_session))
        .route(
            "/api/sessions/:id",
            put(sessions::replace_session).delete(sessions::delete_session),
        )
        .route("/api/sessions/:id/dashboard", get(views::dashboard))
        .route("/api/sessions/:id/overview", get(views::overview))
        .route("/api/sessions/:id/problems", get(views::problems))
        .route("/api/sessions/:id/results", get(views::results))
        .route("/api/sessions/:id/leaderboard", get(views::leaderboard))
        .route("/api/sessions/:id/languages", get(views::languages))
        .route(
            "/api/sessions/:id/language-success",
            get(views::language_success),
        )
        .route("/api/sessions/:id/errors", get(views::errors))
        .route("/api/sessions/:id/error-users", get(views::error_users))
        .route("/api/sessions/:id/attempts", get(views::attempts))
        .route("/api/sessions/:id/matrix", get(views::matrix))
        .route("/api/sessions/:id/histogram", get(views::histogram))
        .route("/api/sessions/:id/filters", get(data::filters))
        .route("/api/sessions/:id/submissions", post(data::submissions))
        .route("/api/sessions/:id/export", post(data::export))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
