// HTTP request handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::session::SessionEntry;
use super::TriageServer;
use crate::errors::TriageError;
use crate::triage::{templates, SessionSnapshot, TurnOutcome};

/// Create the main application router
pub fn create_router(server: Arc<TriageServer>) -> Router {
    Router::new()
        .route("/v1/sessions", post(create_session))
        .route("/v1/turn", post(handle_turn))
        .route("/v1/sessions/:id", get(get_session).delete(delete_session))
        .route("/v1/sessions/:id/reset", post(reset_session))
        .route("/v1/resources", get(get_resources))
        // Health and metrics
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .with_state(server)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedSession {
    pub session_id: String,
}

/// Handle POST /v1/sessions
async fn create_session(
    State(server): State<Arc<TriageServer>>,
) -> Result<(StatusCode, Json<CreatedSession>), AppError> {
    let (session_id, _) = server.session_manager().create()?;
    server.refresh_session_gauge();
    Ok((StatusCode::CREATED, Json(CreatedSession { session_id })))
}

/// Request body for /v1/turn
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    /// Existing session; a new one is created when absent or unknown
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub outcome: TurnOutcome,
}

/// Handle POST /v1/turn
async fn handle_turn(
    State(server): State<Arc<TriageServer>>,
    Json(request): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let (session_id, entry) = server
        .session_manager()
        .get_or_create(request.session_id.as_deref())?;
    server.refresh_session_gauge();

    // Held until the turn completes; resets in the meantime get 409
    let mut guard = entry.lock().await;
    guard.touch();
    let SessionEntry { session, rng, .. } = &mut *guard;

    let outcome = match server.generator() {
        Some(generator) => {
            server
                .engine()
                .process_turn_with(session, &request.message, generator.as_ref(), rng)
                .await
        }
        None => server.engine().process_turn(session, &request.message, rng),
    };
    drop(guard);

    server.metrics().observe_turn(&outcome);

    Ok(Json(TurnResponse {
        session_id,
        outcome,
    }))
}

/// Handle GET /v1/sessions/:id
async fn get_session(
    State(server): State<Arc<TriageServer>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let entry = server.session_manager().get(&session_id)?;
    let guard = entry.lock().await;
    Ok(Json(server.engine().snapshot(&guard.session)))
}

/// Handle POST /v1/sessions/:id/reset
async fn reset_session(
    State(server): State<Arc<TriageServer>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut guard = server.session_manager().lock_for_reset(&session_id)?;
    guard.touch();
    let previous = std::mem::take(&mut guard.session);
    guard.session = server.engine().reset(previous);
    Ok(Json(server.engine().snapshot(&guard.session)))
}

/// Handle DELETE /v1/sessions/:id
async fn delete_session(
    State(server): State<Arc<TriageServer>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !server.session_manager().delete(&session_id) {
        return Err(TriageError::SessionNotFound(session_id).into());
    }
    server.refresh_session_gauge();
    tracing::info!(session_id = %session_id, "Deleted session");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Resources {
    pub resources: String,
    pub sos: String,
}

/// Handle GET /v1/resources
async fn get_resources() -> Json<Resources> {
    Json(Resources {
        resources: templates::CRISIS_RESOURCES.to_string(),
        sos: templates::SOS_MESSAGE.to_string(),
    })
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
    /// Primary reply generator, if any
    pub generator: Option<String>,
}

/// Handle GET /health - Health check endpoint
pub async fn health_check(State(server): State<Arc<TriageServer>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        uptime_seconds: server.uptime().as_secs(),
        active_sessions: server.session_manager().active_count(),
        generator: server.generator().map(|g| g.name().to_string()),
    })
}

/// Handle GET /metrics - Prometheus metrics endpoint
pub async fn metrics_endpoint(
    State(server): State<Arc<TriageServer>>,
) -> Result<Response, AppError> {
    server.refresh_session_gauge();
    let metrics = server.metrics().render()?;
    Ok((StatusCode::OK, metrics).into_response())
}

/// Application error wrapper for proper HTTP error responses
pub struct AppError(anyhow::Error);

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self.0.downcast_ref::<TriageError>() {
            Some(TriageError::SessionNotFound(_)) => (StatusCode::NOT_FOUND, "not_found_error"),
            Some(TriageError::InvalidReset { .. }) => (StatusCode::CONFLICT, "conflict_error"),
            Some(TriageError::SessionLimit { .. }) => {
                (StatusCode::TOO_MANY_REQUESTS, "rate_limit_error")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "api_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, status = %status, "Request rejected");
        }

        let body = serde_json::json!({
            "error": {
                "message": self.0.to_string(),
                "type": error_type
            }
        });

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
