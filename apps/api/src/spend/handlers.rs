use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::spend::SpendSummary;
use crate::state::AppState;

/// GET /api/v1/spend/summary
pub async fn handle_spend_summary(
    State(state): State<AppState>,
) -> Result<Json<SpendSummary>, AppError> {
    Ok(Json(state.spend.summarize().await?))
}
