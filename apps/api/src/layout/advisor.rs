//! Layout Advisor — ranks alternative grid configurations for the same set of slots.
//!
//! Every suggestion is an independent call to `calculate_layout`; nothing is shared
//! between calls. An empty list means no configuration in the search space passes the
//! capacity gates.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::layout::calculator::{calculate_layout, LayoutRequest, LayoutResult};
use crate::layout::page::{Margins, PageConstants};

/// Ratios offered when the user asks which cell shape suits their slots best.
pub const CANDIDATE_RATIOS: [&str; 6] = ["1:1", "4:3", "3:2", "16:9", "3:4", "2:3"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSuggestion {
    pub columns: u32,
    pub layout: LayoutResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioSuggestion {
    pub aspect_ratio: String,
    pub layout: LayoutResult,
}

fn usable(layout: &LayoutResult) -> bool {
    layout.is_valid && layout.errors.is_empty()
}

fn by_area_desc(a: &LayoutResult, b: &LayoutResult) -> Ordering {
    b.cell_area()
        .partial_cmp(&a.cell_area())
        .unwrap_or(Ordering::Equal)
}

/// Tries every column count up to the page maximum for a fixed slot count and ratio.
///
/// Sorted by exact aspect ratio first, then by cell area, largest first.
pub fn suggest_columns(
    slot_count: u32,
    aspect_ratio: &str,
    margins: Option<Margins>,
    page: &PageConstants,
) -> Vec<ColumnSuggestion> {
    let mut suggestions: Vec<ColumnSuggestion> = (1..=page.max_columns)
        .map(|columns| {
            let request = LayoutRequest {
                margins,
                ..LayoutRequest::new(slot_count, columns).with_ratio(aspect_ratio)
            };
            ColumnSuggestion {
                columns,
                layout: calculate_layout(&request, page),
            }
        })
        .filter(|s| usable(&s.layout))
        .collect();

    suggestions.sort_by(|a, b| {
        b.layout
            .aspect_ratio
            .is_exact
            .cmp(&a.layout.aspect_ratio.is_exact)
            .then_with(|| by_area_desc(&a.layout, &b.layout))
    });
    suggestions
}

/// Tries each of `CANDIDATE_RATIOS` for a fixed slot and column count, largest cells first.
pub fn suggest_ratios(
    slot_count: u32,
    columns: u32,
    margins: Option<Margins>,
    page: &PageConstants,
) -> Vec<RatioSuggestion> {
    let mut suggestions: Vec<RatioSuggestion> = CANDIDATE_RATIOS
        .iter()
        .map(|token| {
            let request = LayoutRequest {
                margins,
                ..LayoutRequest::new(slot_count, columns).with_ratio(*token)
            };
            RatioSuggestion {
                aspect_ratio: token.to_string(),
                layout: calculate_layout(&request, page),
            }
        })
        .filter(|s| usable(&s.layout))
        .collect();

    suggestions.sort_by(|a, b| by_area_desc(&a.layout, &b.layout));
    suggestions
}
