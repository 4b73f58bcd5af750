//! Configuration module for the signal deck engine.

pub mod theme;
pub mod tuning;

// Re-export commonly used items
pub use theme::{CHART_TEMPLATE, TRACE_LINE_COLOR, TRACE_LINE_WIDTH, dark_layout_overlay};
pub use tuning::{TUNING, TuningConfig};
