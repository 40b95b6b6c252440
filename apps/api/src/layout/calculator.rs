//! Page Grid Calculator — sizes the image-slot grid of a report page.
//!
//! # Pipeline
//! 1. Basic validation (at least one slot and one column)
//! 2. Capacity gates: max slots, max columns, max rows (terminal, in that order)
//! 3. Available area after margins, minus inter-cell gaps
//! 4. Width- and height-constrained sizing, both always computed
//! 5. `select_strategy` picks one
//! 6. Advisory warnings: undersized cells, overflow, ratio drift
//! 7. Optional horizontal centering (margins only)
//!
//! Only steps 1–2 can make a result invalid. Everything after that degrades to a
//! warning so the editor always gets usable geometry back.

use serde::{Deserialize, Serialize};

use crate::layout::aspect_ratio::{resolve_ratio, DEFAULT_RATIO_TOKEN};
use crate::layout::diagnostics::{DiagnosticSink, LayoutEvent, NoopSink};
use crate::layout::page::{Margins, PageConstants};

// ────────────────────────────────────────────────────────────────────────────
// Request / result types
// ────────────────────────────────────────────────────────────────────────────

/// One grid sizing request from the editor or the export pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub slot_count: u32,
    pub columns: u32,
    /// `None` uses the page defaults.
    #[serde(default)]
    pub margins: Option<Margins>,
    /// `"W:H"` token; malformed tokens resolve to 4:3.
    #[serde(default = "default_ratio_token")]
    pub aspect_ratio: String,
    #[serde(default)]
    pub center_horizontally: bool,
}

fn default_ratio_token() -> String {
    DEFAULT_RATIO_TOKEN.to_string()
}

impl LayoutRequest {
    pub fn new(slot_count: u32, columns: u32) -> Self {
        Self {
            slot_count,
            columns,
            margins: None,
            aspect_ratio: default_ratio_token(),
            center_horizontally: false,
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = Some(margins);
        self
    }

    pub fn with_ratio(mut self, token: impl Into<String>) -> Self {
        self.aspect_ratio = token.into();
        self
    }

    pub fn centered(mut self, center: bool) -> Self {
        self.center_horizontally = center;
        self
    }
}

/// Which axis was fixed to fill its available space exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingStrategy {
    WidthConstrained,
    HeightConstrained,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectRatioReport {
    pub requested: f64,
    pub achieved: f64,
    /// Achieved ratio is within `RATIO_TOLERANCE` of the requested one.
    pub is_exact: bool,
}

/// Computed grid for one request. `is_valid == false` means no grid may be rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub cell_width: f64,
    pub cell_height: f64,
    pub rows: u32,
    pub columns: u32,
    pub total_grid_width: f64,
    pub total_grid_height: f64,
    pub effective_margins: Margins,
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub aspect_ratio: AspectRatioReport,
    pub strategy: Option<SizingStrategy>,
}

impl LayoutResult {
    pub fn cell_area(&self) -> f64 {
        self.cell_width * self.cell_height
    }

    fn rejected(margins: Margins, columns: u32, rows: u32, requested: f64, error: String) -> Self {
        Self {
            cell_width: 0.0,
            cell_height: 0.0,
            rows,
            columns,
            total_grid_width: 0.0,
            total_grid_height: 0.0,
            effective_margins: margins,
            is_valid: false,
            errors: vec![error],
            warnings: vec![],
            aspect_ratio: AspectRatioReport {
                requested,
                achieved: 0.0,
                is_exact: false,
            },
            strategy: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sizing internals
// ────────────────────────────────────────────────────────────────────────────

/// Relative tolerance between requested and achieved aspect ratio.
pub const RATIO_TOLERANCE: f64 = 0.05;

/// Absorbs float noise when comparing slack against zero.
const FIT_EPSILON: f64 = 1e-9;

/// Space on the page left for the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GridArea {
    pub columns: u32,
    pub rows: u32,
    pub gap: f64,
    pub available_width: f64,
    pub available_height: f64,
}

impl GridArea {
    pub(crate) fn new(page: &PageConstants, margins: &Margins, columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            gap: page.gap,
            available_width: page.page_width - margins.horizontal(),
            available_height: page.page_height - margins.vertical(),
        }
    }

    fn gap_width(&self) -> f64 {
        self.columns.saturating_sub(1) as f64 * self.gap
    }

    fn gap_height(&self) -> f64 {
        self.rows.saturating_sub(1) as f64 * self.gap
    }

    fn usable_width(&self) -> f64 {
        self.available_width - self.gap_width()
    }

    fn usable_height(&self) -> f64 {
        self.available_height - self.gap_height()
    }
}

/// The grid one strategy would produce, with slack per axis (negative = overflow).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub strategy: SizingStrategy,
    pub cell_width: f64,
    pub cell_height: f64,
    pub grid_width: f64,
    pub grid_height: f64,
    pub slack_width: f64,
    pub slack_height: f64,
}

impl Candidate {
    pub fn fits(&self) -> bool {
        self.slack_width >= -FIT_EPSILON && self.slack_height >= -FIT_EPSILON
    }

    pub fn total_slack(&self) -> f64 {
        self.slack_width + self.slack_height
    }

    pub fn total_overflow(&self) -> f64 {
        (-self.slack_width).max(0.0) + (-self.slack_height).max(0.0)
    }
}

/// Whole units of `usable / tracks`, truncated toward zero and never negative.
fn track_size(usable: f64, tracks: u32) -> f64 {
    (usable / tracks as f64).trunc().max(0.0)
}

fn size_candidate(strategy: SizingStrategy, area: &GridArea, ratio: f64) -> Candidate {
    let (cell_width, cell_height) = match strategy {
        SizingStrategy::WidthConstrained => {
            let w = track_size(area.usable_width(), area.columns);
            (w, w / ratio)
        }
        SizingStrategy::HeightConstrained => {
            let h = track_size(area.usable_height(), area.rows);
            (h * ratio, h)
        }
    };

    let grid_width = cell_width * area.columns as f64 + area.gap_width();
    let grid_height = cell_height * area.rows as f64 + area.gap_height();

    Candidate {
        strategy,
        cell_width,
        cell_height,
        grid_width,
        grid_height,
        slack_width: area.available_width - grid_width,
        slack_height: area.available_height - grid_height,
    }
}

/// Computes the width- and height-constrained candidates, in that order.
pub(crate) fn evaluate_strategies(area: &GridArea, ratio: f64) -> (Candidate, Candidate) {
    (
        size_candidate(SizingStrategy::WidthConstrained, area, ratio),
        size_candidate(SizingStrategy::HeightConstrained, area, ratio),
    )
}

/// Chooses between the two sizing candidates.
///
/// - both fit → smaller total slack (tie → `width`)
/// - one fits → that one
/// - neither fits → smaller total overflow (tie → `width`)
pub fn select_strategy(width: Candidate, height: Candidate) -> Candidate {
    match (width.fits(), height.fits()) {
        (true, true) => {
            if height.total_slack() < width.total_slack() {
                height
            } else {
                width
            }
        }
        (true, false) => width,
        (false, true) => height,
        (false, false) => {
            if height.total_overflow() < width.total_overflow() {
                height
            } else {
                width
            }
        }
    }
}

/// How many tracks of `cell` separated by `gap` fit into `available`, capped at `tracks`.
fn tracks_that_fit(available: f64, cell: f64, gap: f64, tracks: u32) -> u32 {
    let pitch = cell + gap;
    if pitch <= 0.0 {
        return if available >= 0.0 { tracks } else { 0 };
    }
    let fit = ((available + gap) / pitch + FIT_EPSILON).floor();
    if fit <= 0.0 {
        0
    } else {
        (fit as u32).min(tracks)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Computes the grid for `request` without diagnostics.
pub fn calculate_layout(request: &LayoutRequest, page: &PageConstants) -> LayoutResult {
    calculate_layout_with(request, page, &NoopSink)
}

/// Computes the grid for `request`, reporting intermediate values to `sink`.
pub fn calculate_layout_with(
    request: &LayoutRequest,
    page: &PageConstants,
    sink: &dyn DiagnosticSink,
) -> LayoutResult {
    let margins = request.margins.unwrap_or_else(|| page.default_margins());
    let ratio = resolve_ratio(&request.aspect_ratio).value();
    let slot_count = request.slot_count;
    let columns = request.columns;

    let reject = |rows: u32, reason: String| {
        sink.record(&LayoutEvent::Rejected {
            reason: reason.clone(),
        });
        LayoutResult::rejected(margins, columns, rows, ratio, reason)
    };

    if slot_count == 0 || columns == 0 {
        return reject(
            0,
            format!(
                "Slot count and columns must both be at least 1 (got {slot_count} slots, {columns} columns)"
            ),
        );
    }

    let rows = slot_count.div_ceil(columns);

    if slot_count > page.max_slots {
        return reject(
            rows,
            format!(
                "Too many image slots: {slot_count} requested, a page holds at most {}",
                page.max_slots
            ),
        );
    }
    if columns > page.max_columns {
        return reject(
            rows,
            format!(
                "Too many columns: {columns} requested, at most {} fit across a page",
                page.max_columns
            ),
        );
    }
    if rows > page.max_rows {
        return reject(
            rows,
            format!(
                "Too many rows: {slot_count} slots in {columns} columns need {rows} rows, at most {} fit on a page",
                page.max_rows
            ),
        );
    }

    let area = GridArea::new(page, &margins, columns, rows);
    sink.record(&LayoutEvent::AreaComputed {
        available_width: area.available_width,
        available_height: area.available_height,
        usable_width: area.usable_width(),
        usable_height: area.usable_height(),
    });

    let (by_width, by_height) = evaluate_strategies(&area, ratio);
    for candidate in [&by_width, &by_height] {
        sink.record(&LayoutEvent::StrategyEvaluated {
            strategy: candidate.strategy,
            cell_width: candidate.cell_width,
            cell_height: candidate.cell_height,
            slack_width: candidate.slack_width,
            slack_height: candidate.slack_height,
        });
    }

    let chosen = select_strategy(by_width, by_height);
    sink.record(&LayoutEvent::StrategySelected {
        strategy: chosen.strategy,
    });

    let mut warnings = Vec::new();

    if chosen.cell_width < page.min_cell_size || chosen.cell_height < page.min_cell_size {
        warnings.push(format!(
            "Cells are {:.1} x {:.1} mm, below the {:.1} mm minimum; use fewer columns or rows",
            chosen.cell_width, chosen.cell_height, page.min_cell_size
        ));
    }

    let used_height = chosen.grid_height + margins.vertical();
    if used_height > page.page_height + FIT_EPSILON {
        let overflow = used_height - page.page_height;
        let rows_fit = tracks_that_fit(area.available_height, chosen.cell_height, page.gap, rows);
        let slots_fit = (rows_fit * columns).min(slot_count);
        let dropped = slot_count - slots_fit;
        warnings.push(format!(
            "Grid overflows the page height by {overflow:.1} mm: only {rows_fit} of {rows} rows fit ({slots_fit} slots), {dropped} slots would not fit"
        ));
        sink.record(&LayoutEvent::Overflow {
            axis: "height",
            amount: overflow,
            slots_dropped: dropped,
        });
    }

    let used_width = chosen.grid_width + margins.horizontal();
    if used_width > page.page_width + FIT_EPSILON {
        let overflow = used_width - page.page_width;
        let columns_fit = tracks_that_fit(area.available_width, chosen.cell_width, page.gap, columns);
        let slots_fit = (columns_fit * rows).min(slot_count);
        let dropped = slot_count - slots_fit;
        warnings.push(format!(
            "Grid overflows the page width by {overflow:.1} mm: only {columns_fit} of {columns} columns fit ({slots_fit} slots), {dropped} slots would not fit"
        ));
        sink.record(&LayoutEvent::Overflow {
            axis: "width",
            amount: overflow,
            slots_dropped: dropped,
        });
    }

    let achieved = if chosen.cell_height > 0.0 {
        chosen.cell_width / chosen.cell_height
    } else {
        0.0
    };
    let is_exact = (achieved - ratio).abs() <= ratio * RATIO_TOLERANCE;
    if !is_exact {
        warnings.push(format!(
            "Achieved aspect ratio {achieved:.3} differs from the requested {ratio:.3} by more than {:.0}%",
            RATIO_TOLERANCE * 100.0
        ));
    }

    let mut effective_margins = margins;
    if request.center_horizontally {
        let free = page.page_width - used_width;
        if free > FIT_EPSILON {
            let side = (page.page_width - chosen.grid_width) / 2.0;
            effective_margins.left = side;
            effective_margins.right = side;
            sink.record(&LayoutEvent::Centered {
                left: effective_margins.left,
                right: effective_margins.right,
            });
        } else {
            warnings.push(
                "Horizontal centering not applied: the grid already fills the available width"
                    .to_string(),
            );
        }
    }

    LayoutResult {
        cell_width: chosen.cell_width,
        cell_height: chosen.cell_height,
        rows,
        columns,
        total_grid_width: chosen.grid_width,
        total_grid_height: chosen.grid_height,
        effective_margins,
        is_valid: true,
        errors: vec![],
        warnings,
        aspect_ratio: AspectRatioReport {
            requested: ratio,
            achieved,
            is_exact,
        },
        strategy: Some(chosen.strategy),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
