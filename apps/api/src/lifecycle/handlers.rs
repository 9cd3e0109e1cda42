//! Axum route handlers for record lifecycle transitions.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::record::RecordKind;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReasonBody {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// Resolves `/:kind/:id`, reporting a bad kind or malformed id as a validation error.
fn parse_target(
    path: Result<Path<(String, Uuid)>, PathRejection>,
) -> Result<(RecordKind, Uuid), AppError> {
    let Path((kind, id)) = path.map_err(|e| AppError::Validation(e.body_text()))?;
    let kind = kind.parse().map_err(AppError::Validation)?;
    Ok((kind, id))
}

/// An empty body means "no reason". Anything else must be a valid `ReasonBody`,
/// with or without a JSON content type.
fn parse_reason(body: &Bytes) -> Result<Option<String>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let parsed: ReasonBody = serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))?;
    Ok(parsed.reason)
}

/// POST /api/v1/records/:kind/:id/archive
pub async fn handle_archive(
    State(state): State<AppState>,
    path: Result<Path<(String, Uuid)>, PathRejection>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, AppError> {
    let (kind, id) = parse_target(path)?;
    let reason = parse_reason(&body)?;

    state.lifecycle.archive(kind, id, reason).await?;
    Ok(SuccessResponse::ok())
}

/// POST /api/v1/records/:kind/:id/reject
///
/// Succeeds once the metadata is written, whether or not the report removal did.
pub async fn handle_reject(
    State(state): State<AppState>,
    path: Result<Path<(String, Uuid)>, PathRejection>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, AppError> {
    let (kind, id) = parse_target(path)?;
    let reason = parse_reason(&body)?;

    state.lifecycle.reject(kind, id, reason).await?;
    Ok(SuccessResponse::ok())
}

/// DELETE /api/v1/records/:kind/:id
pub async fn handle_hard_delete(
    State(state): State<AppState>,
    path: Result<Path<(String, Uuid)>, PathRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let (kind, id) = parse_target(path)?;

    state.lifecycle.hard_delete(kind, id).await?;
    Ok(SuccessResponse::ok())
}
