// Page grid layout: sizes the image-slot grid of a report page.
// Everything except `handlers` is pure and synchronous.

pub mod advisor;
pub mod aspect_ratio;
pub mod calculator;
pub mod diagnostics;
pub mod handlers;
pub mod page;
pub mod placement;

pub use advisor::{suggest_columns, suggest_ratios};
pub use aspect_ratio::{resolve_ratio, AspectRatio};
pub use calculator::{calculate_layout, calculate_layout_with, LayoutRequest, LayoutResult};
pub use diagnostics::{DiagnosticSink, LayoutEvent};
pub use page::{Margins, PageConstants, A4_PAGE};
pub use placement::{place_slots, SlotRect};
