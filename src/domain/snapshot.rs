//! The snapshot schema: one `/api/data` payload.
//!
//! Every field is optional. The producer sometimes omits whole sub-objects
//! (startup, error recovery), sometimes sends numbers as strings, and mirrors
//! a handful of indicator values at the top level. Absence is never an error
//! here; consumers substitute their documented defaults.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a JSON number or a numeric string; anything else (null, garbage,
/// non-finite) decodes to `None`.
fn lenient_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(de)?;
    Ok(raw.as_ref().and_then(value_to_f64))
}

fn value_to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|x| x.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
        _ => None,
    }
}

/// Same leniency for integer ids.
fn lenient_i64<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(de)?;
    Ok(raw.as_ref().and_then(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }))
}

/// The producer's trend strength is usually a word (`Fuerte`) but degrades to
/// a bare `0` on its own error path. Render whatever arrived.
fn lenient_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(de)?;
    Ok(raw.as_ref().and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub last_price: Option<f64>,

    #[serde(default)]
    pub indicators: Option<IndicatorSet>,
    #[serde(default)]
    pub buy_signal: Option<Signal>,
    #[serde(default)]
    pub sell_signal: Option<Signal>,
    #[serde(default)]
    pub stop_loss_info: Option<StopLossInfo>,
    #[serde(default)]
    pub market_context: Option<MarketContext>,
    #[serde(default)]
    pub graph: Option<GraphPayload>,

    // Top-level mirrors of the indicator set, written by the producer next to
    // `indicators`. The gauges read these first (see Snapshot::gauge_* below).
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rsi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub macd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub macd_signal: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sma_20: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sma_50: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub adx: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub atr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub trend_status: Option<String>,

    #[serde(default)]
    pub account_info: Option<AccountInfo>,
    #[serde(default)]
    pub trading_info: Option<TradingInfo>,
}

impl Snapshot {
    fn indicator(&self, pick: impl Fn(&IndicatorSet) -> Option<f64>) -> Option<f64> {
        self.indicators.as_ref().and_then(pick)
    }

    // Gauge value sources: top-level mirror first, shared indicator set second.

    pub fn gauge_rsi(&self) -> Option<f64> {
        self.rsi.or_else(|| self.indicator(|i| i.rsi))
    }

    pub fn gauge_macd(&self) -> Option<f64> {
        self.macd.or_else(|| self.indicator(|i| i.macd))
    }

    pub fn gauge_macd_signal(&self) -> Option<f64> {
        self.macd_signal.or_else(|| self.indicator(|i| i.macd_signal))
    }

    pub fn gauge_adx(&self) -> Option<f64> {
        self.adx.or_else(|| self.indicator(|i| i.adx))
    }

    pub fn gauge_atr(&self) -> Option<f64> {
        self.atr.or_else(|| self.indicator(|i| i.atr))
    }

    pub fn shared_sma_20(&self) -> Option<f64> {
        self.sma_20.or_else(|| self.indicator(|i| i.sma_20))
    }

    pub fn shared_sma_50(&self) -> Option<f64> {
        self.sma_50.or_else(|| self.indicator(|i| i.sma_50))
    }

    pub fn signal(&self, side: crate::domain::Side) -> Option<&Signal> {
        match side {
            crate::domain::Side::Buy => self.buy_signal.as_ref(),
            crate::domain::Side::Sell => self.sell_signal.as_ref(),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct IndicatorSet {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rsi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub macd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub macd_signal: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sma_20: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sma_50: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sma_200: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub adx: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub di_plus: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub di_minus: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub atr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volume_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub trend_strength: Option<String>,
    #[serde(default)]
    pub ai_prediction: Option<AiPrediction>,
    #[serde(default)]
    pub risk_management: Option<RiskInfo>,
    #[serde(default)]
    pub volume_analysis: Option<VolumeInfo>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct AiPrediction {
    // `prediction` is the display string ("ALCISTA"/"BAJISTA"); `direction`
    // is the same value under the name the summary block uses.
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub change: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accuracy: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub success_rate: Option<f64>,
}

impl AiPrediction {
    /// Whichever of the two direction spellings is present.
    pub fn direction_text(&self) -> Option<&str> {
        self.prediction.as_deref().or(self.direction.as_deref())
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RiskInfo {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub risk_reward_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub position_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub trade_risk: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct VolumeInfo {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentile: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub momentum: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Signal {
    #[serde(default)]
    pub active: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rsi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub macd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub macd_signal: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
    #[serde(default)]
    pub time_iso: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct StopLossInfo {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub is_buy: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub entry_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub stop_loss: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub take_profit: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct MarketContext {
    #[serde(default)]
    pub trend: Option<TrendInfo>,
    #[serde(default)]
    pub sideways: Option<SidewaysInfo>,
    #[serde(default)]
    pub volatility: Option<VolatilityInfo>,
    #[serde(default)]
    pub crisis: Option<CrisisInfo>,
    #[serde(default)]
    pub market_status: Option<String>,
    #[serde(default)]
    pub blocked_reasons: Vec<String>,
    #[serde(default)]
    pub can_trade: bool,

    // Legacy flat mirrors kept by older producer builds.
    #[serde(default)]
    pub is_sideways: Option<bool>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub crisis_detected: Option<bool>,
    #[serde(default)]
    pub skip_reasons: Vec<String>,
}

impl MarketContext {
    pub fn sideways_flag(&self) -> bool {
        self.sideways
            .as_ref()
            .map(|s| s.is_sideways)
            .or(self.is_sideways)
            .unwrap_or(false)
    }

    pub fn crisis_flag(&self) -> bool {
        self.crisis
            .as_ref()
            .map(|c| c.is_crisis)
            .or(self.crisis_detected)
            .unwrap_or(false)
    }

    /// Reasons trading is blocked. The legacy `skip_reasons` mirror carries
    /// extras (daily limits) the nested list lacks, so it wins when present.
    pub fn blocking_reasons(&self) -> &[String] {
        if !self.skip_reasons.is_empty() {
            &self.skip_reasons
        } else {
            &self.blocked_reasons
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct TrendInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub direction: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub strength: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub adx: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct SidewaysInfo {
    #[serde(default)]
    pub is_sideways: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct VolatilityInfo {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_volatility: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_volatility: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volatility_ratio: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct CrisisInfo {
    #[serde(default)]
    pub is_crisis: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct AccountInfo {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub balance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub daily_trades: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub max_daily_trades: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_pnl: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub win_rate: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct TradingInfo {
    // Open positions are forwarded opaque; no widget renders them directly.
    #[serde(default)]
    pub open_positions: Vec<Value>,
    #[serde(default)]
    pub recent_trades: Vec<TradeRecord>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct TradeRecord {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub entry_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub exit_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pnl: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pnl_percent: Option<f64>,
    #[serde(default)]
    pub entry_time: Option<String>,
    #[serde(default)]
    pub exit_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct GraphPayload {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub layout: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_decodes_to_all_absent() {
        let snap: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snap.last_price.is_none());
        assert!(snap.indicators.is_none());
        assert!(snap.buy_signal.is_none());
        assert!(snap.market_context.is_none());
    }

    #[test]
    fn test_numeric_strings_parse() {
        let snap: Snapshot = serde_json::from_str(
            r#"{"last_price": "42000.5", "indicators": {"rsi": "28.4", "adx": 31}}"#,
        )
        .unwrap();
        assert_eq!(snap.last_price, Some(42000.5));
        let ind = snap.indicators.unwrap();
        assert_eq!(ind.rsi, Some(28.4));
        assert_eq!(ind.adx, Some(31.0));
    }

    #[test]
    fn test_garbage_numerics_decode_to_none() {
        let snap: Snapshot = serde_json::from_str(
            r#"{"last_price": "n/a", "rsi": null, "macd": [], "adx": {"x": 1}}"#,
        )
        .unwrap();
        assert!(snap.last_price.is_none());
        assert!(snap.rsi.is_none());
        assert!(snap.macd.is_none());
        assert!(snap.adx.is_none());
    }

    #[test]
    fn test_gauge_values_prefer_top_level_mirror() {
        let snap: Snapshot = serde_json::from_str(
            r#"{"rsi": 55.0, "indicators": {"rsi": 12.0, "atr": 0.002}}"#,
        )
        .unwrap();
        assert_eq!(snap.gauge_rsi(), Some(55.0));
        // No mirror present: fall through to the shared set
        assert_eq!(snap.gauge_atr(), Some(0.002));
    }

    #[test]
    fn test_numeric_trend_strength_renders_as_text() {
        let ctx: MarketContext =
            serde_json::from_str(r#"{"trend": {"direction": "unknown", "strength": 0}}"#).unwrap();
        assert_eq!(ctx.trend.unwrap().strength.as_deref(), Some("0"));
    }

    #[test]
    fn test_skip_reasons_win_over_blocked_reasons() {
        let ctx: MarketContext = serde_json::from_str(
            r#"{"blocked_reasons": ["Tendencia débil"],
                "skip_reasons": ["Tendencia débil", "Límite diario de operaciones alcanzado"]}"#,
        )
        .unwrap();
        assert_eq!(ctx.blocking_reasons().len(), 2);
    }

    #[test]
    fn test_legacy_crisis_mirror_is_fallback_only() {
        let with_nested: MarketContext = serde_json::from_str(
            r#"{"crisis": {"is_crisis": false}, "crisis_detected": true}"#,
        )
        .unwrap();
        assert!(!with_nested.crisis_flag());

        let legacy_only: MarketContext =
            serde_json::from_str(r#"{"crisis_detected": true}"#).unwrap();
        assert!(legacy_only.crisis_flag());
    }
}
