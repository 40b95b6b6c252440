use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::layout::advisor::{suggest_columns, suggest_ratios, ColumnSuggestion, RatioSuggestion};
use crate::layout::aspect_ratio::DEFAULT_RATIO_TOKEN;
use crate::layout::calculator::{calculate_layout_with, LayoutRequest, LayoutResult};
use crate::layout::diagnostics::TracingSink;
use crate::layout::page::{Margins, PageConstants};
use crate::layout::placement::{place_slots, SlotRect};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ColumnAdviceRequest {
    pub slot_count: u32,
    #[serde(default = "default_ratio_token")]
    pub aspect_ratio: String,
    #[serde(default)]
    pub margins: Option<Margins>,
}

#[derive(Debug, Deserialize)]
pub struct RatioAdviceRequest {
    pub slot_count: u32,
    pub columns: u32,
    #[serde(default)]
    pub margins: Option<Margins>,
}

fn default_ratio_token() -> String {
    DEFAULT_RATIO_TOKEN.to_string()
}

#[derive(Debug, Serialize)]
pub struct PlacementResponse {
    pub layout: LayoutResult,
    pub slots: Vec<SlotRect>,
}

fn compute(request: &LayoutRequest, page: &PageConstants) -> LayoutResult {
    let result = calculate_layout_with(request, page, &TracingSink);
    if result.is_valid {
        info!(
            slots = request.slot_count,
            columns = request.columns,
            cell_width = result.cell_width,
            cell_height = result.cell_height,
            warnings = result.warnings.len(),
            "layout calculated"
        );
    } else {
        warn!(
            slots = request.slot_count,
            columns = request.columns,
            errors = ?result.errors,
            "layout rejected"
        );
    }
    result
}

/// GET /api/v1/layout/page
pub async fn handle_page_constants(State(state): State<AppState>) -> Json<PageConstants> {
    Json(state.page)
}

/// POST /api/v1/layout/calculate
pub async fn handle_calculate(
    State(state): State<AppState>,
    body: Result<Json<LayoutRequest>, JsonRejection>,
) -> Result<Json<LayoutResult>, AppError> {
    let Json(req) = body?;
    Ok(Json(compute(&req, &state.page)))
}

/// POST /api/v1/layout/place
pub async fn handle_place(
    State(state): State<AppState>,
    body: Result<Json<LayoutRequest>, JsonRejection>,
) -> Result<Json<PlacementResponse>, AppError> {
    let Json(req) = body?;
    let layout = compute(&req, &state.page);
    let slots = place_slots(&layout, req.slot_count, state.page.gap);
    Ok(Json(PlacementResponse { layout, slots }))
}

/// POST /api/v1/layout/advise/columns
pub async fn handle_advise_columns(
    State(state): State<AppState>,
    body: Result<Json<ColumnAdviceRequest>, JsonRejection>,
) -> Result<Json<Vec<ColumnSuggestion>>, AppError> {
    let Json(req) = body?;
    let suggestions = suggest_columns(req.slot_count, &req.aspect_ratio, req.margins, &state.page);
    info!(
        slots = req.slot_count,
        suggestions = suggestions.len(),
        "column advice computed"
    );
    Ok(Json(suggestions))
}

/// POST /api/v1/layout/advise/ratios
pub async fn handle_advise_ratios(
    State(state): State<AppState>,
    body: Result<Json<RatioAdviceRequest>, JsonRejection>,
) -> Result<Json<Vec<RatioSuggestion>>, AppError> {
    let Json(req) = body?;
    let suggestions = suggest_ratios(req.slot_count, req.columns, req.margins, &state.page);
    info!(
        slots = req.slot_count,
        columns = req.columns,
        suggestions = suggestions.len(),
        "ratio advice computed"
    );
    Ok(Json(suggestions))
}
