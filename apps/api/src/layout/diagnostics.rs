//! Observer hook for the layout calculator.
//!
//! The calculator reports what it computed through a [`DiagnosticSink`] instead of
//! logging inline, so the computation itself stays pure. The service plugs in
//! [`TracingSink`]; tests and library callers get [`NoopSink`].

use tracing::debug;

use crate::layout::calculator::SizingStrategy;

/// One observation made while computing a layout.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    /// Basic validation or a capacity gate refused the request.
    Rejected { reason: String },
    /// Page area left for the grid once margins and gaps are removed.
    AreaComputed {
        available_width: f64,
        available_height: f64,
        usable_width: f64,
        usable_height: f64,
    },
    /// One sizing strategy evaluated against the available area.
    StrategyEvaluated {
        strategy: SizingStrategy,
        cell_width: f64,
        cell_height: f64,
        slack_width: f64,
        slack_height: f64,
    },
    StrategySelected { strategy: SizingStrategy },
    /// The chosen grid does not fit on `axis` by `amount`.
    Overflow {
        axis: &'static str,
        amount: f64,
        slots_dropped: u32,
    },
    /// Horizontal centering rewrote the side margins.
    Centered { left: f64, right: f64 },
}

/// Receives calculator events. Implementations must not influence the result.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: &LayoutEvent);
}

/// Discards every event.
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn record(&self, _event: &LayoutEvent) {}
}

/// Forwards events to `tracing` at debug level with structured fields.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &LayoutEvent) {
        match event {
            LayoutEvent::Rejected { reason } => debug!(%reason, "layout rejected"),
            LayoutEvent::AreaComputed {
                available_width,
                available_height,
                usable_width,
                usable_height,
            } => debug!(
                available_width,
                available_height, usable_width, usable_height, "layout area computed"
            ),
            LayoutEvent::StrategyEvaluated {
                strategy,
                cell_width,
                cell_height,
                slack_width,
                slack_height,
            } => debug!(
                ?strategy,
                cell_width, cell_height, slack_width, slack_height, "sizing strategy evaluated"
            ),
            LayoutEvent::StrategySelected { strategy } => {
                debug!(?strategy, "sizing strategy selected")
            }
            LayoutEvent::Overflow {
                axis,
                amount,
                slots_dropped,
            } => debug!(axis, amount, slots_dropped, "grid overflows page"),
            LayoutEvent::Centered { left, right } => debug!(left, right, "grid centered"),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Keeps every event for inspection.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub events: Mutex<Vec<LayoutEvent>>,
    }

    impl RecordingSink {
        pub fn snapshot(&self) -> Vec<LayoutEvent> {
            self.events.lock().map(|e| e.clone()).unwrap_or_default()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn record(&self, event: &LayoutEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event.clone());
            }
        }
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::default();
        sink.record(&LayoutEvent::StrategySelected {
            strategy: SizingStrategy::WidthConstrained,
        });
        sink.record(&LayoutEvent::Centered {
            left: 12.0,
            right: 12.0,
        });
        let events = sink.snapshot();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], LayoutEvent::Centered { .. }));
    }

    #[test]
    fn test_tracing_sink_accepts_every_event() {
        let sink = TracingSink;
        sink.record(&LayoutEvent::Rejected {
            reason: "too many columns".to_string(),
        });
        sink.record(&LayoutEvent::Overflow {
            axis: "height",
            amount: 3.0,
            slots_dropped: 4,
        });
    }
}
