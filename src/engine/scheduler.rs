//! The refresh loop.
//!
//! One cycle: fetch a snapshot, derive evaluations and recommendations,
//! reduce to a widget tree, diff against the previous tree, hand the patches
//! to the surface. Cycles never overlap; the inter-cycle delay starts when a
//! cycle COMPLETES, so a slow fetch stretches the wall-clock period instead
//! of stacking requests.

use std::time::Duration;

use chrono::Local;

use crate::analysis;
use crate::config::TUNING;
use crate::data::SnapshotSource;
use crate::render::RenderSurface;
use crate::widgets::{self, Evaluations, WidgetTree, build_chart};

/// Where the engine is within a cycle. Guards against re-entry the same way
/// the surface refresh button should: a tick that lands mid-fetch is dropped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Fetching,
}

pub struct DeckEngine<S, R> {
    source: S,
    surface: R,
    /// Last tree pushed to the surface; the diff baseline.
    tree: WidgetTree,
    period: Duration,
    phase: Phase,
    cycles_completed: u64,
}

impl<S: SnapshotSource, R: RenderSurface> DeckEngine<S, R> {
    pub fn new(source: S, surface: R, period: Duration) -> Self {
        Self {
            source,
            surface,
            tree: WidgetTree::new(),
            period,
            phase: Phase::Idle,
            cycles_completed: 0,
        }
    }

    pub fn with_default_period(source: S, surface: R) -> Self {
        Self::new(source, surface, Duration::from_secs(TUNING.refresh.period_secs))
    }

    /// Push the bootstrap defaults so the surface never shows a blank page.
    pub fn bootstrap(&mut self) {
        let defaults = widgets::default_tree();
        let patches = defaults.diff(&self.tree);
        log::info!("Bootstrapping surface with {} default widgets", patches.len());
        self.surface.apply(&patches);
        self.tree = defaults;
    }

    /// One full cycle. Returns whether a fresh tree was pushed; a failed
    /// fetch logs and leaves the previous tree standing.
    pub async fn run_once(&mut self) -> bool {
        if self.phase == Phase::Fetching {
            log::warn!("Cycle already in flight, dropping tick");
            return false;
        }

        self.phase = Phase::Fetching;
        let fetched = self.source.fetch_snapshot().await;
        self.phase = Phase::Idle;

        let snapshot = match fetched {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::error!("Snapshot fetch via {} failed: {err}", self.source.signature());
                return false;
            }
        };

        let evaluations = Evaluations::from_snapshot(&snapshot);
        let recommendations = analysis::compose(&snapshot);
        let now = Local::now();
        let next = widgets::reduce(&snapshot, &evaluations, &recommendations, &now);

        let patches = next.diff(&self.tree);
        log::debug!(
            "Cycle {}: {} of {} widgets changed",
            self.cycles_completed + 1,
            patches.len(),
            next.len()
        );
        self.surface.apply(&patches);

        if let Some(chart) = build_chart(snapshot.graph.as_ref()) {
            self.surface.render_chart(&chart);
        }

        self.tree = next;
        self.cycles_completed += 1;
        true
    }

    /// Bootstrap, then cycle until stopped. `once` runs a single cycle and
    /// returns, for smoke runs and cron-style invocation.
    pub async fn run(&mut self, once: bool) {
        self.bootstrap();
        loop {
            self.run_once().await;
            if once {
                return;
            }
            tokio::time::sleep(self.period).await;
        }
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::Snapshot;
    use crate::error::FetchError;
    use crate::widgets::{ChartPayload, WidgetPatch};

    /// Replays a scripted sequence of fetch outcomes.
    struct ScriptedSource {
        script: Mutex<Vec<Result<Snapshot, FetchError>>>,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<Result<Snapshot, FetchError>>) -> Self {
            Self {
                script: Mutex::new(outcomes),
            }
        }
    }

    #[async_trait]
    impl SnapshotSource for ScriptedSource {
        fn signature(&self) -> &'static str {
            "scripted"
        }

        async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
            self.script.lock().unwrap().remove(0)
        }
    }

    /// Captures every patch batch for assertions.
    #[derive(Default)]
    struct RecordingSurface {
        batches: Vec<Vec<WidgetPatch>>,
        charts: usize,
    }

    impl RenderSurface for RecordingSurface {
        fn apply(&mut self, patches: &[WidgetPatch]) {
            self.batches.push(patches.to_vec());
        }

        fn render_chart(&mut self, _chart: &ChartPayload) {
            self.charts += 1;
        }
    }

    fn snapshot(json: &str) -> Snapshot {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_bootstrap_pushes_full_default_tree() {
        let mut engine = DeckEngine::new(
            ScriptedSource::new(vec![]),
            RecordingSurface::default(),
            Duration::from_secs(60),
        );
        engine.bootstrap();

        let surface = engine.surface();
        assert_eq!(surface.batches.len(), 1);
        assert_eq!(surface.batches[0].len(), engine.tree().len());
        assert!(engine.tree().get("rsi-value").is_some());
    }

    #[tokio::test]
    async fn test_cycle_applies_snapshot_values() {
        let source = ScriptedSource::new(vec![Ok(snapshot(r#"{"last_price": 42000.0}"#))]);
        let mut engine =
            DeckEngine::new(source, RecordingSurface::default(), Duration::from_secs(60));
        engine.bootstrap();

        assert!(engine.run_once().await);
        assert_eq!(engine.cycles_completed(), 1);
        assert_eq!(engine.tree().get("last-price").unwrap().text, "42000.00");

        let last_batch = engine.surface().batches.last().unwrap();
        assert!(last_batch.iter().any(|p| p.id == "last-price"));
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_previous_tree_standing() {
        let source = ScriptedSource::new(vec![
            Ok(snapshot(r#"{"last_price": 42000.0}"#)),
            Err(FetchError::Http {
                status: 500,
                message: "Error al obtener datos".to_string(),
            }),
        ]);
        let mut engine =
            DeckEngine::new(source, RecordingSurface::default(), Duration::from_secs(60));
        engine.bootstrap();

        assert!(engine.run_once().await);
        let before = engine.tree().clone();

        assert!(!engine.run_once().await);
        assert_eq!(engine.tree(), &before);
        assert_eq!(engine.cycles_completed(), 1);
        // No patch batch was pushed for the failed cycle
        assert_eq!(engine.surface().batches.len(), 2);
    }

    #[tokio::test]
    async fn test_unchanged_snapshot_produces_minimal_patches() {
        let payload = r#"{"last_price": 42000.0, "indicators": {"rsi": 55.0}}"#;
        let source =
            ScriptedSource::new(vec![Ok(snapshot(payload)), Ok(snapshot(payload))]);
        let mut engine =
            DeckEngine::new(source, RecordingSurface::default(), Duration::from_secs(60));
        engine.bootstrap();

        assert!(engine.run_once().await);
        assert!(engine.run_once().await);

        // Only the clock widget may differ between identical snapshots
        let second = engine.surface().batches.last().unwrap();
        assert!(second.iter().all(|p| p.id == "last-update"));
    }

    #[tokio::test]
    async fn test_chart_rendered_only_when_graph_present() {
        let with_graph = r#"{"graph": {"data": [{"x": [1, 2], "y": [3, 4]}], "layout": {}}}"#;
        let source = ScriptedSource::new(vec![
            Ok(snapshot(r#"{"last_price": 1.0}"#)),
            Ok(snapshot(with_graph)),
        ]);
        let mut engine =
            DeckEngine::new(source, RecordingSurface::default(), Duration::from_secs(60));

        engine.run_once().await;
        assert_eq!(engine.surface().charts, 0);
        engine.run_once().await;
        assert_eq!(engine.surface().charts, 1);
    }

    #[tokio::test]
    async fn test_run_once_flag_stops_after_one_cycle() {
        let source = ScriptedSource::new(vec![Ok(snapshot(r#"{"last_price": 5.0}"#))]);
        let mut engine =
            DeckEngine::new(source, RecordingSurface::default(), Duration::from_secs(60));
        engine.run(true).await;
        assert_eq!(engine.cycles_completed(), 1);
    }
}
