//! Recommendation composition: turns active signals into the human-readable
//! entries the recommendation panel renders.

use strum::IntoEnumIterator;

use crate::config::TUNING;
use crate::domain::{Side, Snapshot};
use crate::utils::fmt::{dp, format_time};

/// One composed entry. Created fresh every cycle from active signals only.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub side: Side,
    pub title: String,
    pub price: f64,
    pub time: String,
    pub analysis_lines: Vec<String>,
    /// 25 points per rationale predicate that held (0 when only the generic
    /// placeholder line is present, 75 max with three predicates).
    pub strength: u8,
}

const STRENGTH_PER_PREDICATE: u8 = 25;

/// Compose entries for every active signal, buy before sell. Empty when
/// neither side is active.
pub fn compose(snapshot: &Snapshot) -> Vec<Recommendation> {
    Side::iter()
        .filter_map(|side| compose_side(snapshot, side))
        .collect()
}

fn compose_side(snapshot: &Snapshot, side: Side) -> Option<Recommendation> {
    let signal = snapshot.signal(side).filter(|s| s.active)?;

    let mut analysis = Vec::new();

    // Predicate 1: RSI extreme at detection time
    if let Some(rsi) = signal.rsi {
        match side {
            Side::Buy if rsi < TUNING.thresholds.rsi_oversold => analysis.push(format!(
                "RSI muy bajo ({}) - Mercado sobrevendido",
                dp(rsi, 2)
            )),
            Side::Sell if rsi > TUNING.thresholds.rsi_overbought => analysis.push(format!(
                "RSI muy alto ({}) - Mercado sobrecomprado",
                dp(rsi, 2)
            )),
            _ => {}
        }
    }

    // Predicate 2: MACD cross direction (signal macd vs the shared signal line)
    if let (Some(macd), Some(macd_signal)) = (signal.macd, snapshot.gauge_macd_signal()) {
        match side {
            Side::Buy if macd > macd_signal => analysis.push(format!(
                "Cruce alcista del MACD ({} > {})",
                dp(macd, 4),
                dp(macd_signal, 4)
            )),
            Side::Sell if macd < macd_signal => analysis.push(format!(
                "Cruce bajista del MACD ({} < {})",
                dp(macd, 4),
                dp(macd_signal, 4)
            )),
            _ => {}
        }
    }

    // Predicate 3: SMA relation, only when both averages are present
    if let (Some(sma_20), Some(sma_50)) = (snapshot.shared_sma_20(), snapshot.shared_sma_50()) {
        match side {
            Side::Buy if sma_20 > sma_50 => analysis.push(format!(
                "Media móvil corta ({}) por encima de la larga ({})",
                dp(sma_20, 2),
                dp(sma_50, 2)
            )),
            Side::Sell if sma_20 < sma_50 => analysis.push(format!(
                "Media móvil corta ({}) por debajo de la larga ({})",
                dp(sma_20, 2),
                dp(sma_50, 2)
            )),
            _ => {}
        }
    }

    let strength = STRENGTH_PER_PREDICATE * analysis.len() as u8;

    if analysis.is_empty() {
        analysis.push(match side {
            Side::Buy => "Patrón de compra detectado".to_string(),
            Side::Sell => "Patrón de venta detectado".to_string(),
        });
    }

    let price = signal
        .price
        .or(snapshot.last_price)
        .filter(|p| p.is_finite())
        .unwrap_or(0.0);

    let time = signal
        .time_iso
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(format_time)
        .unwrap_or_else(|| "Reciente".to_string());

    Some(Recommendation {
        side,
        title: format!("Señal de {} detectada", side.label()),
        price,
        time,
        analysis_lines: analysis,
        strength,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Signal;

    fn active_signal() -> Signal {
        Signal {
            active: true,
            price: Some(42_150.0),
            rsi: Some(20.0),
            macd: Some(0.0015),
            time_iso: Some("2024-05-14T08:30:00".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_active_signals_composes_nothing() {
        let snapshot = Snapshot::default();
        assert!(compose(&snapshot).is_empty());

        // Present but inactive signals count as absent too
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"buy_signal": {"active": false, "rsi": 20}, "sell_signal": {"active": false}}"#,
        )
        .unwrap();
        assert!(compose(&snapshot).is_empty());
    }

    #[test]
    fn test_three_predicates_score_seventy_five() {
        let snapshot = Snapshot {
            buy_signal: Some(active_signal()),
            macd_signal: Some(0.0009),
            sma_20: Some(101.5),
            sma_50: Some(100.0),
            last_price: Some(42_000.0),
            ..Default::default()
        };
        let recs = compose(&snapshot);
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.analysis_lines.len(), 3);
        assert_eq!(rec.strength, 75);
        assert_eq!(rec.title, "Señal de COMPRA detectada");
        assert!(rec.analysis_lines[0].contains("sobrevendido"));
        assert!(rec.analysis_lines[1].contains("Cruce alcista"));
        assert!(rec.analysis_lines[2].contains("por encima"));
    }

    #[test]
    fn test_no_predicate_yields_placeholder_at_zero_strength() {
        let signal = Signal {
            active: true,
            rsi: Some(50.0), // neither extreme
            ..Default::default()
        };
        let snapshot = Snapshot {
            sell_signal: Some(signal),
            ..Default::default()
        };
        let recs = compose(&snapshot);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].analysis_lines, vec!["Patrón de venta detectado"]);
        assert_eq!(recs[0].strength, 0);
    }

    #[test]
    fn test_buy_entry_precedes_sell_entry() {
        let snapshot = Snapshot {
            buy_signal: Some(active_signal()),
            sell_signal: Some(Signal {
                active: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        let recs = compose(&snapshot);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].side, Side::Buy);
        assert_eq!(recs[1].side, Side::Sell);
    }

    #[test]
    fn test_price_falls_back_to_last_price_then_zero() {
        let mut signal = active_signal();
        signal.price = None;
        let snapshot = Snapshot {
            buy_signal: Some(signal.clone()),
            last_price: Some(42_000.0),
            ..Default::default()
        };
        assert_eq!(compose(&snapshot)[0].price, 42_000.0);

        let snapshot = Snapshot {
            buy_signal: Some(signal),
            ..Default::default()
        };
        assert_eq!(compose(&snapshot)[0].price, 0.0);
    }

    #[test]
    fn test_missing_time_renders_reciente() {
        let mut signal = active_signal();
        signal.time_iso = None;
        let snapshot = Snapshot {
            buy_signal: Some(signal),
            ..Default::default()
        };
        assert_eq!(compose(&snapshot)[0].time, "Reciente");
    }
}
