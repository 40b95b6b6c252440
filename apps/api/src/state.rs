use crate::layout::PageConstants;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Page constants resolved once at startup from `Config`; read-only afterwards.
    pub page: PageConstants,
}
