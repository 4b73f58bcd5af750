//! Bootstrap widget states, shown between startup and the first snapshot.

use strum::IntoEnumIterator;

use crate::analysis::evaluate;
use crate::domain::{Side, Snapshot};
use crate::utils::fmt::PLACEHOLDER;
use crate::widgets::ids;
use crate::widgets::state::{Tone, WidgetState, WidgetTree};
use crate::widgets::sync;

/// The tree every surface starts from. Mostly the same states the reducer
/// produces for an all-absent snapshot, with a few bootstrap-only literals
/// layered on top that the live reducer never emits again.
pub fn default_tree() -> WidgetTree {
    let empty = Snapshot::default();
    let mut tree = WidgetTree::new();

    for side in Side::iter() {
        sync::sync_conditions(&mut tree, side, &evaluate(side, None, None));
        sync::sync_signal_card(&mut tree, side, None, None, None);
    }
    sync::sync_gauges(&mut tree, &empty);
    sync::sync_ai_panel(&mut tree, None);
    sync::sync_risk_panel(&mut tree, None, None);
    sync::sync_volume_panel(&mut tree, None);
    sync::sync_market_context(&mut tree, &empty);
    sync::sync_recommendations(&mut tree, &empty, &[]);
    sync::sync_trade_history(&mut tree, None, None);

    // Bootstrap-only literals
    tree.set(
        ids::VOLUME_RATIO_VALUE,
        WidgetState::text("1.00x promedio (0 / 0)"),
    );
    tree.set(ids::VOLUME_RATIO_BAR, WidgetState::bar(50.0, Tone::Success.bar()));
    tree.set(ids::POSITION_SIZE, WidgetState::text("0.0100 BTC"));
    tree.set(ids::TREND_STATUS_VALUE, WidgetState::text("Analizando..."));
    tree.set(ids::LAST_PRICE, WidgetState::text(PLACEHOLDER));
    tree.set(ids::LAST_UPDATE, WidgetState::text(PLACEHOLDER));

    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tree_covers_every_static_widget() {
        let tree = default_tree();
        for id in [
            ids::LAST_PRICE,
            ids::LAST_UPDATE,
            ids::RSI_VALUE,
            ids::MACD_STATUS,
            ids::ADX_BAR,
            ids::ATR_STATUS,
            ids::AI_ACTION_TEXT,
            ids::RISK_REWARD_RATIO,
            ids::VOLUME_TREND,
            ids::SIDEWAYS_BADGE,
            ids::MARKET_DETAILS,
            ids::RECOMMENDATIONS,
            ids::TRADING_HISTORY,
            ids::ACCOUNT_BALANCE,
        ] {
            assert!(tree.get(id).is_some(), "missing default for {id}");
        }
    }

    #[test]
    fn test_bootstrap_literals() {
        let tree = default_tree();
        assert_eq!(tree.get(ids::LAST_PRICE).unwrap().text, "--");
        assert_eq!(tree.get(ids::LAST_UPDATE).unwrap().text, "--");
        assert_eq!(
            tree.get(ids::VOLUME_RATIO_VALUE).unwrap().text,
            "1.00x promedio (0 / 0)"
        );
        assert_eq!(tree.get(ids::POSITION_SIZE).unwrap().text, "0.0100 BTC");
        let bar = tree.get(ids::VOLUME_RATIO_BAR).unwrap();
        assert_eq!(bar.bar_pct, Some(50.0));
        assert_eq!(bar.class, "progress-bar bg-success");
        assert_eq!(tree.get(ids::TREND_STATUS_VALUE).unwrap().text, "Analizando...");
    }

    #[test]
    fn test_default_condition_rows_use_coerced_zeroes() {
        let tree = default_tree();
        // All twelve condition rows exist; none is met on the empty snapshot
        // except the structurally degenerate sell-side comparisons on zero
        let item = tree.get("buy-rsi-condition").unwrap();
        assert_eq!(item.class, "condition-item met");
        let value = tree.get("buy-rsi-value").unwrap();
        assert_eq!(value.text, "-- (Req: < 30)");
    }

    #[test]
    fn test_default_badges_load() {
        let tree = default_tree();
        assert_eq!(tree.get(ids::SIDEWAYS_BADGE).unwrap().text, "Cargando...");
        assert_eq!(tree.get(ids::MARKET_TREND_BADGE).unwrap().text, "Cargando...");
        assert!(!tree.get(ids::MARKET_DETAILS).unwrap().visible);
    }
}
