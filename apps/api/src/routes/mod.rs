pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::lifecycle::handlers;
use crate::spend::handlers::handle_spend_summary;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Record lifecycle
        .route(
            "/api/v1/records/:kind/:id/archive",
            post(handlers::handle_archive),
        )
        .route(
            "/api/v1/records/:kind/:id/reject",
            post(handlers::handle_reject),
        )
        .route(
            "/api/v1/records/:kind/:id",
            delete(handlers::handle_hard_delete),
        )
        // Spend analytics
        .route("/api/v1/spend/summary", get(handle_spend_summary))
        .with_state(state)
}
