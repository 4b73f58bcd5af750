//! Chart payload preparation: dark-theme overlay merge and trace backfill.

use serde_json::{Map, Value, json};

use crate::config::{CHART_TEMPLATE, TRACE_LINE_COLOR, TRACE_LINE_WIDTH, dark_layout_overlay};
use crate::domain::GraphPayload;

/// What the charting collaborator receives: themed traces plus the merged
/// layout. Stays as raw JSON end to end; this module never interprets the
/// price data itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPayload {
    pub traces: Vec<Value>,
    pub layout: Value,
}

/// Build the themed payload, or `None` when there is nothing worth drawing:
/// no graph, no traces, or a first trace with an empty `x` axis.
pub fn build_chart(graph: Option<&GraphPayload>) -> Option<ChartPayload> {
    let graph = graph?;
    if graph.data.is_empty() {
        return None;
    }

    let has_x = graph.data[0]
        .get("x")
        .and_then(Value::as_array)
        .is_some_and(|x| !x.is_empty());
    if !has_x {
        return None;
    }

    let traces = graph.data.iter().map(backfill_trace_line).collect();
    let layout = merge_layout(&graph.layout);

    Some(ChartPayload { traces, layout })
}

/// Server layout under the dark overlay: overlay keys replace server keys
/// wholesale (top-level only), then the template is pinned.
fn merge_layout(server_layout: &Value) -> Value {
    let mut merged = match server_layout {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    if let Value::Object(overlay) = dark_layout_overlay() {
        for (key, value) in overlay {
            merged.insert(key, value);
        }
    }
    merged.insert("template".to_string(), json!(CHART_TEMPLATE));

    Value::Object(merged)
}

/// Give any trace that carries a `line` object a visible color and width.
/// Traces without a `line` (candlesticks) pass through untouched.
fn backfill_trace_line(trace: &Value) -> Value {
    let mut out = trace.clone();
    if let Some(line) = out.get_mut("line").and_then(Value::as_object_mut) {
        line.entry("color".to_string())
            .or_insert_with(|| json!(TRACE_LINE_COLOR));
        line.entry("width".to_string())
            .or_insert_with(|| json!(TRACE_LINE_WIDTH));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(data: Vec<Value>, layout: Value) -> GraphPayload {
        GraphPayload { data, layout }
    }

    #[test]
    fn test_no_graph_or_empty_traces_yields_none() {
        assert!(build_chart(None).is_none());
        assert!(build_chart(Some(&graph(vec![], json!({})))).is_none());
    }

    #[test]
    fn test_empty_x_axis_yields_none() {
        let g = graph(vec![json!({"x": [], "y": []})], json!({}));
        assert!(build_chart(Some(&g)).is_none());
        let g = graph(vec![json!({"y": [1, 2]})], json!({}));
        assert!(build_chart(Some(&g)).is_none());
    }

    #[test]
    fn test_overlay_wins_on_conflicting_layout_keys() {
        let g = graph(
            vec![json!({"x": ["2024-01-01"], "y": [1.0]})],
            json!({"paper_bgcolor": "#ffffff", "height": 700}),
        );
        let chart = build_chart(Some(&g)).unwrap();
        // Overlay replaces the server's light background
        assert_eq!(chart.layout["paper_bgcolor"], "rgba(0,0,0,0)");
        // Server keys the overlay does not cover survive
        assert_eq!(chart.layout["height"], 700);
        assert_eq!(chart.layout["template"], "plotly_dark");
    }

    #[test]
    fn test_trace_line_backfill_preserves_explicit_values() {
        let g = graph(
            vec![
                json!({"x": ["2024-01-01"], "y": [1.0], "line": {}}),
                json!({"x": ["2024-01-01"], "y": [2.0], "line": {"color": "#ff0000"}}),
                json!({"x": ["2024-01-01"], "type": "candlestick"}),
            ],
            json!({}),
        );
        let chart = build_chart(Some(&g)).unwrap();
        assert_eq!(chart.traces[0]["line"]["color"], "#4b6cb7");
        assert_eq!(chart.traces[0]["line"]["width"], 2);
        assert_eq!(chart.traces[1]["line"]["color"], "#ff0000");
        assert_eq!(chart.traces[1]["line"]["width"], 2);
        // No line object: untouched
        assert!(chart.traces[2].get("line").is_none());
    }
}
