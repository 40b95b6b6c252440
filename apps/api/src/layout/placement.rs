//! Slot placement — page-space rectangles for each slot of a computed grid.
//!
//! Origin is the page's top-left corner, y grows downward. Slots fill row-major in
//! reading order; empty trailing cells of the last row are not emitted.

use serde::{Deserialize, Serialize};

use crate::layout::calculator::LayoutResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotRect {
    /// Zero-based slot index in reading order.
    pub index: u32,
    pub row: u32,
    pub column: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Rectangles for the first `slot_count` cells of `layout`. Invalid layouts place nothing.
pub fn place_slots(layout: &LayoutResult, slot_count: u32, gap: f64) -> Vec<SlotRect> {
    if !layout.is_valid || layout.columns == 0 {
        return vec![];
    }

    let capacity = layout.rows.saturating_mul(layout.columns);
    let origin_x = layout.effective_margins.left;
    let origin_y = layout.effective_margins.header;

    (0..slot_count.min(capacity))
        .map(|index| {
            let row = index / layout.columns;
            let column = index % layout.columns;
            SlotRect {
                index,
                row,
                column,
                x: origin_x + column as f64 * (layout.cell_width + gap),
                y: origin_y + row as f64 * (layout.cell_height + gap),
                width: layout.cell_width,
                height: layout.cell_height,
            }
        })
        .collect()
}
