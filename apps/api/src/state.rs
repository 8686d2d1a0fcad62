use crate::ai::adapter::AiAdapter;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one demo session.
    pub store: Store,
    pub ai: AiAdapter,
}
