//! Session management handlers
//!
//! CRUD for linked WhatsApp sessions plus connection start/stop.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use domain::{Session, SessionId, SessionStatus};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

/// Session representation
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: i64,
    pub name: String,
    pub status: SessionStatus,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id().as_i64(),
            name: session.name().to_string(),
            status: session.status(),
            is_default: session.is_default(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

/// Create-session request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Update-session request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSessionRequest {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// List all sessions
#[instrument(skip(state))]
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    let sessions = state.session_service.list_sessions().await?;
    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

/// Get one session
#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.session_service.get_session(SessionId::new(id)).await?;
    Ok(Json(session.into()))
}

/// Create a session
#[instrument(skip(state, request), fields(name = %request.name))]
pub async fn create_session(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let session = state
        .session_service
        .create_session(&request.name, request.is_default)
        .await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

/// Rename a session
#[instrument(skip(state, request))]
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateSessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .session_service
        .rename_session(SessionId::new(id), &request.name)
        .await?;
    Ok(Json(session.into()))
}

/// Delete a session
#[instrument(skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .session_service
        .delete_session(SessionId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Make a session the default
#[instrument(skip(state))]
pub async fn set_default_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.session_service.set_default(SessionId::new(id)).await?;
    Ok(Json(session.into()))
}

/// Connect a session
#[instrument(skip(state))]
pub async fn start_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .session_service
        .start_session(SessionId::new(id))
        .await?;
    Ok(Json(session.into()))
}

/// Disconnect a session
#[instrument(skip(state))]
pub async fn stop_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .session_service
        .stop_session(SessionId::new(id))
        .await?;
    Ok(Json(session.into()))
}
