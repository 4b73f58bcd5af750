//! Stable widget identifiers.
//!
//! These are the addresses render surfaces look widgets up by; changing one
//! silently orphans the widget on every surface, so they live in one place.

use crate::analysis::CheckKind;
use crate::domain::Side;

// Header / chart
pub const GRAPH: &str = "graph";
pub const LAST_PRICE: &str = "last-price";
pub const LAST_UPDATE: &str = "last-update";

// Indicator gauges
pub const RSI_VALUE: &str = "rsi-value";
pub const RSI_BAR: &str = "rsi-bar";
pub const RSI_STATUS: &str = "rsi-status";
pub const MACD_VALUE: &str = "macd-value";
pub const MACD_SIGNAL_VALUE: &str = "macd-signal-value";
pub const MACD_STATUS: &str = "macd-status";
pub const ADX_VALUE: &str = "adx-value";
pub const ADX_BAR: &str = "adx-bar";
pub const ADX_STATUS: &str = "adx-status";
pub const ATR_VALUE: &str = "atr-value";
pub const ATR_BAR: &str = "atr-bar";
pub const ATR_STATUS: &str = "atr-status";

// AI prediction panel
pub const AI_PREDICTION_VALUE: &str = "ai-prediction-value";
pub const AI_CONFIDENCE_BAR: &str = "ai-confidence-bar";
pub const AI_CONFIDENCE_BADGE: &str = "ai-confidence-badge";
pub const AI_ACTION_TEXT: &str = "ai-action-text";
pub const AI_ACTION_REASON: &str = "ai-action-reason";
pub const AI_RECOMMENDATION: &str = "ai-recommendation";
pub const AI_ACCURACY: &str = "ai-accuracy";
pub const AI_SUCCESS_RATE: &str = "ai-success-rate";

// Risk panel
pub const RISK_REWARD_RATIO: &str = "risk-reward-ratio";
pub const POSITION_SIZE: &str = "position-size";
pub const TRADE_RISK: &str = "trade-risk";

// Volume panel
pub const VOLUME_RATIO_VALUE: &str = "volume-ratio-value";
pub const VOLUME_RATIO_BAR: &str = "volume-ratio-bar";
pub const CURRENT_VOLUME: &str = "current-volume";
pub const AVERAGE_VOLUME: &str = "average-volume";
pub const VOLUME_PERCENTILE: &str = "volume-percentile";
pub const VOLUME_MOMENTUM: &str = "volume-momentum";
pub const VOLUME_ALERT: &str = "volume-alert";
pub const VOLUME_TREND: &str = "volume-trend";

// Market-context panel
pub const SIDEWAYS_BADGE: &str = "sideways-market-badge";
pub const SENTIMENT_BADGE: &str = "sentiment-badge";
pub const VOLATILITY_BADGE: &str = "volatility-badge";
pub const CRISIS_BADGE: &str = "crisis-badge";
pub const BLOCKED_REASONS_LIST: &str = "blocked-reasons-list";
pub const TREND_STATUS_VALUE: &str = "trend-status-value";
pub const MARKET_TREND_BADGE: &str = "market-trend-badge";
pub const MARKET_DETAILS: &str = "market-details";

// Recommendation panel + trade history
pub const RECOMMENDATIONS: &str = "recommendations";
pub const TRADING_HISTORY: &str = "trading-history";
pub const ACCOUNT_BALANCE: &str = "account-balance";

// Per-side composers

pub fn condition_item(side: Side, check: CheckKind) -> String {
    format!("{}-{}-condition", side.slug(), check.slug())
}

pub fn condition_value(side: Side, check: CheckKind) -> String {
    format!("{}-{}-value", side.slug(), check.slug())
}

pub fn signal_card(side: Side) -> String {
    format!("{}-signal", side.slug())
}

pub fn card_price(side: Side) -> String {
    format!("{}-price", side.slug())
}

pub fn card_rsi(side: Side) -> String {
    format!("{}-rsi", side.slug())
}

pub fn card_macd(side: Side) -> String {
    format!("{}-macd", side.slug())
}

pub fn card_signal_num(side: Side) -> String {
    format!("{}-signal-num", side.slug())
}

pub fn card_time(side: Side) -> String {
    format!("{}-time", side.slug())
}

pub fn card_status(side: Side) -> String {
    format!("{}-status", side.slug())
}

pub fn card_risk_info(side: Side) -> String {
    format!("{}-risk-info", side.slug())
}

pub fn card_stop_loss(side: Side) -> String {
    format!("{}-sl", side.slug())
}

pub fn card_take_profit(side: Side) -> String {
    format!("{}-tp", side.slug())
}

pub fn card_progress(side: Side) -> String {
    format!("{}-progress", side.slug())
}

pub fn card_distance(side: Side) -> String {
    format!("{}-distance", side.slug())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_ids_compose_side_and_check() {
        assert_eq!(condition_item(Side::Buy, CheckKind::Rsi), "buy-rsi-condition");
        assert_eq!(
            condition_value(Side::Sell, CheckKind::MacdCross),
            "sell-macd-value"
        );
    }

    #[test]
    fn test_card_ids() {
        assert_eq!(signal_card(Side::Buy), "buy-signal");
        assert_eq!(card_signal_num(Side::Sell), "sell-signal-num");
        assert_eq!(card_risk_info(Side::Buy), "buy-risk-info");
    }
}
