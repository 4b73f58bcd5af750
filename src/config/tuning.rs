//! Evaluation thresholds and refresh tuning

/// Thresholds for the six-condition battery
pub struct ConditionThresholds {
    // RSI is oversold below this (buy side) and overbought above the other (sell side)
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    // Minimum ADX for a tradeable trend (same threshold both sides)
    pub adx_trend: f64,
    // Volume ratio vs its average; above 1 means above-average activity
    pub volume_ratio: f64,
    // Composite score cutoffs, buy wants > score_buy, sell wants < score_sell
    pub score_buy: f64,
    pub score_sell: f64,
}

/// Distance-to-stop coloring bands (percent of entry price)
pub struct StopRiskBands {
    pub danger_pct: f64,
    pub warning_pct: f64,
}

/// AI confidence bands (percent), shared by the bar, the badge and the action matrix
pub struct ConfidenceBands {
    pub strong: f64,
    pub moderate: f64,
    pub weak: f64,
}

/// Gauge interpretation bands
pub struct GaugeBands {
    pub adx_strong: f64,
    pub adx_moderate: f64,
    // ATR bands apply to ATR as a percentage of the last price
    pub atr_calm_pct: f64,
    pub atr_moderate_pct: f64,
}

/// Volume panel bands
pub struct VolumeBands {
    pub surge: f64,
    pub elevated: f64,
    pub above_average: f64,
    pub normal_floor: f64,
    // Percentile highlighting (already 0..1 on the wire, shown as percent)
    pub percentile_hot: f64,
    pub percentile_warm: f64,
}

/// Market-context volatility label bands (applied to volatility_ratio)
pub struct ContextBands {
    pub volatility_high: f64,
    pub volatility_medium: f64,
}

/// Fixed parameters for the displayed position-size arithmetic
pub struct PositionSizing {
    // Reference account notional in USDT used for the sizing figure
    pub account_notional: f64,
    // Fraction of the notional risked per trade
    pub risk_fraction: f64,
    // Assumed stop distance as a fraction of the entry price
    pub stop_fraction: f64,
    // Demo starting balance when the producer sends no account info
    pub demo_start_balance: f64,
}

/// Cycle cadence and data endpoint
pub struct RefreshConfig {
    // Seconds between cycle COMPLETIONS (the sleep starts after a cycle ends)
    pub period_secs: u64,
    pub endpoint: &'static str,
}

/// The master tuning configuration
pub struct TuningConfig {
    pub thresholds: ConditionThresholds,
    pub stop_risk: StopRiskBands,
    pub confidence: ConfidenceBands,
    pub gauges: GaugeBands,
    pub volume: VolumeBands,
    pub context: ContextBands,
    pub sizing: PositionSizing,
    pub refresh: RefreshConfig,
}

pub const TUNING: TuningConfig = TuningConfig {
    thresholds: ConditionThresholds {
        rsi_oversold: 30.0,
        rsi_overbought: 70.0,
        adx_trend: 25.0,
        volume_ratio: 1.0,
        score_buy: 0.6,
        score_sell: -0.6,
    },

    stop_risk: StopRiskBands {
        danger_pct: 0.3,
        warning_pct: 0.5,
    },

    confidence: ConfidenceBands {
        strong: 80.0,
        moderate: 60.0,
        weak: 40.0,
    },

    gauges: GaugeBands {
        adx_strong: 50.0,
        adx_moderate: 25.0,
        atr_calm_pct: 0.5,
        atr_moderate_pct: 1.0,
    },

    volume: VolumeBands {
        surge: 2.0,
        elevated: 1.5,
        above_average: 1.0,
        normal_floor: 0.8,
        percentile_hot: 90.0,
        percentile_warm: 70.0,
    },

    context: ContextBands {
        volatility_high: 2.0,
        volatility_medium: 1.0,
    },

    sizing: PositionSizing {
        account_notional: 10_000.0,
        risk_fraction: 0.01,
        stop_fraction: 0.02,
        demo_start_balance: 50.0,
    },

    refresh: RefreshConfig {
        period_secs: 60,
        endpoint: "http://127.0.0.1:5000/api/data",
    },
};
