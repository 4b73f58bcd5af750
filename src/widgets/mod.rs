// Widget tree construction: ids, states, the per-cycle reducer and the
// bootstrap defaults, plus the chart payload builder
pub mod chart;
pub mod defaults;
pub mod ids;
pub mod state;
pub mod sync;

// Re-export commonly used types
pub use chart::{ChartPayload, build_chart};
pub use defaults::default_tree;
pub use state::{Tone, WidgetPatch, WidgetState, WidgetTree};
pub use sync::{Evaluations, reduce};
