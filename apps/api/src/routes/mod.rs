pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::layout::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/layout/page", get(handlers::handle_page_constants))
        .route("/api/v1/layout/calculate", post(handlers::handle_calculate))
        .route("/api/v1/layout/place", post(handlers::handle_place))
        .route(
            "/api/v1/layout/advise/columns",
            post(handlers::handle_advise_columns),
        )
        .route(
            "/api/v1/layout/advise/ratios",
            post(handlers::handle_advise_ratios),
        )
        .fallback(not_found)
        .with_state(state)
}
