//! Aspect-ratio tokens (`"W:H"`) coming from the report configuration UI.
//!
//! Parsing is lenient: anything that is not two positive finite numbers separated by a
//! colon resolves to the default 4:3 so a bad setting never blocks layout.

use serde::{Deserialize, Serialize};

pub const DEFAULT_RATIO_TOKEN: &str = "4:3";

/// Width:height pair of a cell, both components strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

pub const DEFAULT_RATIO: AspectRatio = AspectRatio {
    width: 4.0,
    height: 3.0,
};

impl AspectRatio {
    /// Scalar `width / height`, the form used for sizing and comparison.
    pub fn value(&self) -> f64 {
        self.width / self.height
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        DEFAULT_RATIO
    }
}

/// Resolves a ratio token such as `"16:9"` or `" 1.5 : 1 "`.
///
/// Falls back to [`DEFAULT_RATIO`] on a missing colon, extra colons, non-numeric,
/// non-finite or non-positive components, or a quotient that overflows or underflows.
pub fn resolve_ratio(token: &str) -> AspectRatio {
    parse_ratio(token).unwrap_or(DEFAULT_RATIO)
}

fn parse_ratio(token: &str) -> Option<AspectRatio> {
    let (w, h) = token.trim().split_once(':')?;
    let width = parse_component(w)?;
    let height = parse_component(h)?;
    let ratio = AspectRatio { width, height };
    let value = ratio.value();
    (value.is_finite() && value > 0.0).then_some(ratio)
}

fn parse_component(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}
