//! The six-condition battery evaluated per signal side.
//!
//! Evaluation is a pure function of the merged value set. Two asymmetries are
//! deliberate and load-bearing:
//! - an absent value evaluates as `0` for the met/unmet decision but renders
//!   as `--`, so a genuine zero and an absent value look the same on screen
//!   while potentially deciding differently;
//! - ADX and volume use the same rule on both sides, the other four flip.

use crate::config::TUNING;
use crate::domain::{IndicatorSet, Side, Signal};
use crate::utils::fmt::opt_dp;

/// One named check, in fixed display order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, strum_macros::EnumIter)]
pub enum CheckKind {
    Rsi,
    MacdCross,
    SmaCross,
    Adx,
    VolumeRatio,
    Score,
}

impl CheckKind {
    /// Id segment for the condition-row widgets (`buy-rsi-condition`, ...).
    pub fn slug(&self) -> &'static str {
        match self {
            CheckKind::Rsi => "rsi",
            CheckKind::MacdCross => "macd",
            CheckKind::SmaCross => "sma",
            CheckKind::Adx => "adx",
            CheckKind::VolumeRatio => "volume",
            CheckKind::Score => "score",
        }
    }
}

/// Outcome of one check: decision plus the strings the checklist renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionResult {
    pub check: CheckKind,
    pub met: bool,
    pub value: String,
    pub threshold: String,
}

/// The merged value set a side is judged against: the shared indicators
/// overlaid with any field the signal itself carries.
#[derive(Debug, Default, Clone, Copy)]
struct EffectiveValues {
    rsi: Option<f64>,
    macd: Option<f64>,
    macd_signal: Option<f64>,
    sma_20: Option<f64>,
    sma_50: Option<f64>,
    adx: Option<f64>,
    volume_ratio: Option<f64>,
    score: Option<f64>,
}

impl EffectiveValues {
    fn merge(signal: Option<&Signal>, indicators: Option<&IndicatorSet>) -> Self {
        let mut v = Self::default();
        if let Some(ind) = indicators {
            v.rsi = ind.rsi;
            v.macd = ind.macd;
            v.macd_signal = ind.macd_signal;
            v.sma_20 = ind.sma_20;
            v.sma_50 = ind.sma_50;
            v.adx = ind.adx;
            v.volume_ratio = ind.volume_ratio;
            v.score = ind.score;
        }
        if let Some(sig) = signal {
            // Signal-specific values win over the shared set
            v.rsi = sig.rsi.or(v.rsi);
            v.macd = sig.macd.or(v.macd);
            v.macd_signal = sig.macd_signal.or(v.macd_signal);
        }
        v
    }
}

// Absent evaluates as zero; display handles absence separately.
fn logic(v: Option<f64>) -> f64 {
    v.unwrap_or(0.0)
}

/// Evaluate all six checks for one side. Output order is fixed: RSI, MACD,
/// SMA, ADX, volume, score.
pub fn evaluate(
    side: Side,
    signal: Option<&Signal>,
    indicators: Option<&IndicatorSet>,
) -> Vec<ConditionResult> {
    let v = EffectiveValues::merge(signal, indicators);
    let t = &TUNING.thresholds;

    let rsi = ConditionResult {
        check: CheckKind::Rsi,
        met: match side {
            Side::Buy => logic(v.rsi) < t.rsi_oversold,
            Side::Sell => logic(v.rsi) > t.rsi_overbought,
        },
        value: opt_dp(v.rsi, 2),
        threshold: match side {
            Side::Buy => format!("< {:.0}", t.rsi_oversold),
            Side::Sell => format!("> {:.0}", t.rsi_overbought),
        },
    };

    let macd = ConditionResult {
        check: CheckKind::MacdCross,
        met: match side {
            Side::Buy => logic(v.macd) > logic(v.macd_signal),
            Side::Sell => logic(v.macd) < logic(v.macd_signal),
        },
        value: format!("{} | {}", opt_dp(v.macd, 6), opt_dp(v.macd_signal, 6)),
        threshold: match side {
            Side::Buy => "MACD > Señal".to_string(),
            Side::Sell => "MACD < Señal".to_string(),
        },
    };

    let sma = ConditionResult {
        check: CheckKind::SmaCross,
        met: match side {
            Side::Buy => logic(v.sma_20) > logic(v.sma_50),
            Side::Sell => logic(v.sma_20) < logic(v.sma_50),
        },
        value: format!("{} | {}", opt_dp(v.sma_20, 2), opt_dp(v.sma_50, 2)),
        threshold: match side {
            Side::Buy => "SMA20 > SMA50".to_string(),
            Side::Sell => "SMA20 < SMA50".to_string(),
        },
    };

    // Trend strength and volume are side-agnostic checks
    let adx = ConditionResult {
        check: CheckKind::Adx,
        met: logic(v.adx) > t.adx_trend,
        value: opt_dp(v.adx, 2),
        threshold: format!("> {:.0}", t.adx_trend),
    };

    let volume = ConditionResult {
        check: CheckKind::VolumeRatio,
        met: logic(v.volume_ratio) > t.volume_ratio,
        value: opt_dp(v.volume_ratio, 2),
        threshold: format!("> {:.0}", t.volume_ratio),
    };

    let score = ConditionResult {
        check: CheckKind::Score,
        met: match side {
            Side::Buy => logic(v.score) > t.score_buy,
            Side::Sell => logic(v.score) < t.score_sell,
        },
        value: opt_dp(v.score, 2),
        threshold: match side {
            Side::Buy => format!("> {}", t.score_buy),
            Side::Sell => format!("< {}", t.score_sell),
        },
    };

    vec![rsi, macd, sma, adx, volume, score]
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn indicators() -> IndicatorSet {
        IndicatorSet {
            rsi: Some(25.0),
            macd: Some(0.0012),
            macd_signal: Some(0.0009),
            sma_20: Some(101.5),
            sma_50: Some(100.0),
            adx: Some(31.0),
            volume_ratio: Some(1.4),
            score: Some(0.7),
            ..Default::default()
        }
    }

    #[test]
    fn test_output_order_is_fixed() {
        let results = evaluate(Side::Buy, None, Some(&indicators()));
        let expected: Vec<CheckKind> = CheckKind::iter().collect();
        let got: Vec<CheckKind> = results.iter().map(|r| r.check).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_rsi_oversold_buy() {
        let results = evaluate(Side::Buy, None, Some(&indicators()));
        let rsi = &results[0];
        assert!(rsi.met);
        assert_eq!(rsi.value, "25.00");
        assert_eq!(rsi.threshold, "< 30");
    }

    #[test]
    fn test_rsi_sell_side_flips() {
        let results = evaluate(Side::Sell, None, Some(&indicators()));
        let rsi = &results[0];
        assert!(!rsi.met); // 25 is not > 70
        assert_eq!(rsi.threshold, "> 70");
    }

    #[test]
    fn test_macd_cross_format_and_decision() {
        let results = evaluate(Side::Buy, None, Some(&indicators()));
        let macd = &results[1];
        assert!(macd.met);
        assert_eq!(macd.value, "0.001200 | 0.000900");
        assert_eq!(macd.threshold, "MACD > Señal");

        let sell = evaluate(Side::Sell, None, Some(&indicators()));
        assert!(!sell[1].met);
        assert_eq!(sell[1].threshold, "MACD < Señal");
    }

    #[test]
    fn test_signal_values_override_indicators() {
        let signal = Signal {
            active: true,
            rsi: Some(75.0),
            ..Default::default()
        };
        let results = evaluate(Side::Sell, Some(&signal), Some(&indicators()));
        assert!(results[0].met); // signal rsi 75 > 70, not the shared 25
        assert_eq!(results[0].value, "75.00");
    }

    #[test]
    fn test_missing_signal_fields_fall_back_to_indicators() {
        let mut ind = indicators();
        ind.rsi = Some(22.0);
        let signal = Signal::default(); // rsi absent
        let results = evaluate(Side::Buy, Some(&signal), Some(&ind));
        assert!(results[0].met);
        assert_eq!(results[0].value, "22.00");
    }

    #[test]
    fn test_absent_values_are_zero_for_logic_but_placeholder_for_display() {
        let results = evaluate(Side::Buy, None, None);
        let rsi = &results[0];
        // 0 < 30: the absent-as-zero rule makes this pass on the buy side
        assert!(rsi.met);
        assert_eq!(rsi.value, "--");

        let macd = &results[1];
        assert!(!macd.met); // 0 > 0 is false
        assert_eq!(macd.value, "-- | --");

        let score = &results[5];
        assert!(!score.met); // 0 > 0.6 is false
        assert_eq!(score.value, "--");
    }

    #[test]
    fn test_adx_and_volume_same_rule_both_sides() {
        let buy = evaluate(Side::Buy, None, Some(&indicators()));
        let sell = evaluate(Side::Sell, None, Some(&indicators()));
        assert_eq!(buy[3].met, sell[3].met);
        assert_eq!(buy[3].threshold, sell[3].threshold);
        assert_eq!(buy[4].met, sell[4].met);
    }

    #[test]
    fn test_score_asymmetric_cutoffs() {
        let mut ind = indicators();
        ind.score = Some(-0.7);
        let buy = evaluate(Side::Buy, None, Some(&ind));
        let sell = evaluate(Side::Sell, None, Some(&ind));
        assert!(!buy[5].met);
        assert!(sell[5].met);
        assert_eq!(sell[5].threshold, "< -0.6");
    }

    #[test]
    fn test_evaluate_is_pure() {
        let a = evaluate(Side::Buy, None, Some(&indicators()));
        let b = evaluate(Side::Buy, None, Some(&indicators()));
        assert_eq!(a, b);
    }
}
