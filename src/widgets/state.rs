//! The widget tree: an ordered id -> state map produced by one reducer run.
//!
//! The reducer builds a fresh tree every cycle; the engine diffs it against
//! the previous tree and hands only the changed entries to the render
//! surface. BTreeMap keeps the diff order deterministic.

use std::collections::BTreeMap;

/// Bootstrap-style presentation tone, mapped onto the page's class names.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Tone {
    Success,
    Danger,
    Warning,
    Info,
    Secondary,
    Muted,
}

impl Tone {
    pub fn badge(&self) -> &'static str {
        match self {
            Tone::Success => "badge bg-success",
            Tone::Danger => "badge bg-danger",
            Tone::Warning => "badge bg-warning",
            Tone::Info => "badge bg-info",
            Tone::Secondary => "badge bg-secondary",
            Tone::Muted => "badge bg-light text-muted",
        }
    }

    pub fn bar(&self) -> &'static str {
        match self {
            Tone::Success => "progress-bar bg-success",
            Tone::Danger => "progress-bar bg-danger",
            Tone::Warning => "progress-bar bg-warning",
            Tone::Info => "progress-bar bg-info",
            Tone::Secondary => "progress-bar bg-secondary",
            Tone::Muted => "progress-bar",
        }
    }

    pub fn alert(&self) -> &'static str {
        match self {
            Tone::Success => "alert alert-success mb-0",
            Tone::Danger => "alert alert-danger mb-0",
            Tone::Warning => "alert alert-warning mb-0",
            Tone::Info => "alert alert-info mb-0",
            Tone::Secondary => "alert alert-secondary mb-0",
            Tone::Muted => "alert mb-0",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Tone::Success => "text-success",
            Tone::Danger => "text-danger",
            Tone::Warning => "text-warning",
            Tone::Info => "text-info",
            Tone::Secondary => "text-secondary",
            Tone::Muted => "text-muted",
        }
    }
}

/// Display state of one widget. CSS classes are presentation signals only,
/// never part of the data contract.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WidgetState {
    pub text: String,
    pub class: String,
    /// Progress-bar width in percent, for bar widgets only.
    pub bar_pct: Option<f64>,
    pub visible: bool,
    /// Multi-line body for list-style widgets (blocked reasons, history, ...).
    pub lines: Vec<String>,
    pub tooltip: Option<String>,
}

impl WidgetState {
    /// Plain visible text, no class.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
            ..Default::default()
        }
    }

    /// Text with a class string.
    pub fn classed(text: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: class.into(),
            visible: true,
            ..Default::default()
        }
    }

    /// A progress bar at `pct` percent width.
    pub fn bar(pct: f64, class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            bar_pct: Some(pct),
            visible: true,
            ..Default::default()
        }
    }

    /// A multi-line body widget.
    pub fn body(lines: Vec<String>, class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            lines,
            visible: true,
            ..Default::default()
        }
    }

    /// A hidden widget (risk sub-panels, dismissed alerts).
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// One changed widget, as handed to a render surface. A surface that does not
/// recognize the id skips the patch; its siblings still apply.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetPatch {
    pub id: String,
    pub state: WidgetState,
}

/// The full id -> state map for one cycle.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WidgetTree {
    entries: BTreeMap<String, WidgetState>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: impl Into<String>, state: WidgetState) {
        self.entries.insert(id.into(), state);
    }

    pub fn get(&self, id: &str) -> Option<&WidgetState> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &WidgetState)> {
        self.entries.iter()
    }

    /// Entries that differ from `previous` (new ids included), in id order.
    /// Last-cycle-wins: no merging, the new state replaces the old wholesale.
    pub fn diff(&self, previous: &WidgetTree) -> Vec<WidgetPatch> {
        self.entries
            .iter()
            .filter(|(id, state)| previous.get(id) != Some(state))
            .map(|(id, state)| WidgetPatch {
                id: id.clone(),
                state: state.clone(),
            })
            .collect()
    }
}
