use std::sync::Arc;

use crate::lifecycle::LifecycleManager;
use crate::spend::SpendAggregator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both services own their store clients; nothing here reaches a store directly.
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<LifecycleManager>,
    pub spend: Arc<SpendAggregator>,
}
