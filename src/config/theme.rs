//! Chart dark-theme constants
//!
//! The producer's chart layout arrives themed for a light page. The dashboard
//! is dark, so a fixed overlay is merged over the server layout (overlay wins
//! per top-level key) and traces get a visible default line.

use serde_json::{Value, json};

/// Plotly template applied after the merge.
pub const CHART_TEMPLATE: &str = "plotly_dark";

/// Default line color backfilled onto traces that carry a `line` object.
pub const TRACE_LINE_COLOR: &str = "#4b6cb7";

/// Default line width backfilled next to [`TRACE_LINE_COLOR`].
pub const TRACE_LINE_WIDTH: u64 = 2;

/// The layout overlay. Keys here replace the server's layout keys wholesale.
pub fn dark_layout_overlay() -> Value {
    json!({
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "font": { "color": "#e0e0e0" },
        "xaxis": {
            "gridcolor": "rgba(255, 255, 255, 0.1)",
            "linecolor": "rgba(255, 255, 255, 0.2)",
            "zerolinecolor": "rgba(255, 255, 255, 0.1)",
            "showgrid": true,
            "rangeslider": { "visible": true },
            "type": "date"
        },
        "yaxis": {
            "gridcolor": "rgba(255, 255, 255, 0.1)",
            "linecolor": "rgba(255, 255, 255, 0.2)",
            "zerolinecolor": "rgba(255, 255, 255, 0.1)",
            "showgrid": true,
            "fixedrange": false,
            "side": "right",
            "title": "Precio",
            "titlefont": { "color": "#e0e0e0" },
            "tickfont": { "color": "#e0e0e0" },
            "tickformat": ".8f"
        },
        "hovermode": "x unified",
        "hoverlabel": {
            "bgcolor": "rgba(30, 30, 30, 0.9)",
            "font": { "color": "#e0e0e0" }
        },
        "legend": {
            "orientation": "h",
            "y": -0.2,
            "font": { "color": "#e0e0e0" },
            "bgcolor": "rgba(0, 0, 0, 0.5)"
        },
        "margin": { "t": 30, "b": 50, "l": 50, "r": 30, "pad": 4 },
        "showlegend": true,
        "dragmode": "zoom",
        "selectdirection": "any",
        // Carried from the producer's page verbatim; the charting collaborator
        // ignores keys it does not know.
        "xaxis_rangeslider_visible": false
    })
}
