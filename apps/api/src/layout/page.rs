//! Physical constants of the target page and the margin record shared by requests and results.
//!
//! All lengths are millimetres. `A4_PAGE` is the built-in medium; the service may
//! override individual values once at startup (see `Config::from_env`), after which the
//! constants are only ever read.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Page constants
// ────────────────────────────────────────────────────────────────────────────

/// Fixed constraints of the medium a report page is printed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageConstants {
    pub page_width: f64,
    pub page_height: f64,
    /// Capacity gate: most slots allowed in one row.
    pub max_columns: u32,
    /// Capacity gate: most rows allowed on one page.
    pub max_rows: u32,
    /// Capacity gate: most slots allowed on one page.
    pub max_slots: u32,
    /// Cells below this size on either axis trigger an advisory warning.
    pub min_cell_size: f64,
    /// Space between neighbouring cells, horizontally and vertically.
    pub gap: f64,
    /// Left/right/bottom margin used when a request carries no margins.
    pub default_margin: f64,
    /// Distance from page top to grid top used when a request carries no margins.
    pub default_header: f64,
}

/// A4 portrait, 4 × 5 slots at most.
pub const A4_PAGE: PageConstants = PageConstants {
    page_width: 210.0,
    page_height: 297.0,
    max_columns: 4,
    max_rows: 5,
    max_slots: 20,
    min_cell_size: 30.0,
    gap: 5.0,
    default_margin: 10.0,
    default_header: 45.0,
};

impl Default for PageConstants {
    fn default() -> Self {
        A4_PAGE
    }
}

impl PageConstants {
    /// Margins applied when the caller does not supply any.
    pub fn default_margins(&self) -> Margins {
        Margins {
            left: self.default_margin,
            right: self.default_margin,
            bottom: self.default_margin,
            header: self.default_header,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Margins
// ────────────────────────────────────────────────────────────────────────────

/// Page insets around the grid. `header` is measured from the page top to the grid top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub header: f64,
}

impl Margins {
    pub fn new(left: f64, right: f64, bottom: f64, header: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            header,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.header + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_is_default() {
        assert_eq!(PageConstants::default(), A4_PAGE);
        assert_eq!(A4_PAGE.max_slots, A4_PAGE.max_columns * A4_PAGE.max_rows);
    }

    #[test]
    fn test_default_margins_use_header_for_top() {
        let m = A4_PAGE.default_margins();
        assert_eq!(m, Margins::new(10.0, 10.0, 10.0, 45.0));
        assert_eq!(m.horizontal(), 20.0);
        assert_eq!(m.vertical(), 55.0);
    }
}
