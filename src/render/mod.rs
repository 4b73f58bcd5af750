// Render surfaces: where widget patches land
use crate::widgets::{ChartPayload, WidgetPatch};

/// A thing that can display the dashboard. Patches arrive in id order;
/// a surface that does not recognize an id skips that patch and still
/// applies its siblings.
pub trait RenderSurface {
    fn apply(&mut self, patches: &[WidgetPatch]);

    fn render_chart(&mut self, chart: &ChartPayload);
}

/// Logs every applied patch. The headless default, also handy for watching
/// what a cycle actually changed.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    patches_applied: u64,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patches_applied(&self) -> u64 {
        self.patches_applied
    }
}

impl RenderSurface for ConsoleSurface {
    fn apply(&mut self, patches: &[WidgetPatch]) {
        for patch in patches {
            if patch.state.visible {
                let shown = if patch.state.lines.is_empty() {
                    patch.state.text.clone()
                } else {
                    patch.state.lines.join(" | ")
                };
                log::debug!("[{}] {:?} class={:?}", patch.id, shown, patch.state.class);
            } else {
                log::debug!("[{}] hidden", patch.id);
            }
        }
        self.patches_applied += patches.len() as u64;
        log::info!("Applied {} widget patches", patches.len());
    }

    fn render_chart(&mut self, chart: &ChartPayload) {
        log::info!("Chart updated: {} traces", chart.traces.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::WidgetState;

    #[test]
    fn test_console_surface_counts_patches() {
        let mut surface = ConsoleSurface::new();
        surface.apply(&[
            WidgetPatch {
                id: "rsi-value".to_string(),
                state: WidgetState::text("50.00"),
            },
            WidgetPatch {
                id: "not-a-known-widget".to_string(),
                state: WidgetState::hidden(),
            },
        ]);
        assert_eq!(surface.patches_applied(), 2);
    }
}
