//! The widget-state reducer.
//!
//! One call per cycle turns the snapshot plus the derived evaluation and
//! recommendation results into a complete widget tree. The reducer is pure:
//! the same inputs always produce the same tree, which is what makes the
//! engine's diff-and-apply step idempotent. Every group substitutes its
//! documented fallback when its slice of the snapshot is absent, so one
//! missing sub-object never touches a sibling group.

use chrono::{DateTime, Local};
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::analysis::{ConditionResult, Recommendation, evaluate};
use crate::config::TUNING;
use crate::domain::{
    AccountInfo, AiPrediction, RiskInfo, Side, Signal, Snapshot, StopLossInfo, TradingInfo,
    VolumeInfo,
};
use crate::utils::fmt::{bar_pct, clock_stamp, dp, format_time, opt_dp, pos_dp, signed_dp};
use crate::widgets::ids;
use crate::widgets::state::{Tone, WidgetState, WidgetTree};

/// Both sides' condition results for one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluations {
    pub buy: Vec<ConditionResult>,
    pub sell: Vec<ConditionResult>,
}

impl Evaluations {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            buy: evaluate(Side::Buy, snapshot.buy_signal.as_ref(), snapshot.indicators.as_ref()),
            sell: evaluate(
                Side::Sell,
                snapshot.sell_signal.as_ref(),
                snapshot.indicators.as_ref(),
            ),
        }
    }

    pub fn side(&self, side: Side) -> &[ConditionResult] {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }
}

/// Build the full tree for one cycle.
pub fn reduce(
    snapshot: &Snapshot,
    evaluations: &Evaluations,
    recommendations: &[Recommendation],
    now: &DateTime<Local>,
) -> WidgetTree {
    let mut tree = WidgetTree::new();
    let indicators = snapshot.indicators.as_ref();

    for side in Side::iter() {
        sync_conditions(&mut tree, side, evaluations.side(side));
        sync_signal_card(
            &mut tree,
            side,
            snapshot.signal(side),
            snapshot.last_price,
            snapshot.stop_loss_info.as_ref(),
        );
    }

    sync_gauges(&mut tree, snapshot);
    sync_ai_panel(&mut tree, indicators.and_then(|i| i.ai_prediction.as_ref()));
    sync_risk_panel(
        &mut tree,
        indicators.and_then(|i| i.risk_management.as_ref()),
        snapshot.last_price,
    );
    sync_volume_panel(&mut tree, indicators.and_then(|i| i.volume_analysis.as_ref()));
    sync_market_context(&mut tree, snapshot);
    sync_recommendations(&mut tree, snapshot, recommendations);
    sync_trade_history(
        &mut tree,
        snapshot.trading_info.as_ref(),
        snapshot.account_info.as_ref(),
    );

    tree.set(ids::LAST_PRICE, WidgetState::text(opt_dp(snapshot.last_price, 2)));
    tree.set(
        ids::LAST_UPDATE,
        WidgetState::text(format!("Última actualización: {}", clock_stamp(now))),
    );

    tree
}

// --- CONDITION CHECKLIST ---

pub(crate) fn sync_conditions(tree: &mut WidgetTree, side: Side, results: &[ConditionResult]) {
    for result in results {
        let item_class = if result.met {
            "condition-item met"
        } else {
            "condition-item not-met"
        };
        let tooltip = format!(
            "Valor actual: {}\nRequerido: {}",
            result.value, result.threshold
        );
        tree.set(
            ids::condition_item(side, result.check),
            WidgetState::classed("", item_class).with_tooltip(tooltip),
        );
        tree.set(
            ids::condition_value(side, result.check),
            WidgetState::text(format!("{} (Req: {})", result.value, result.threshold)),
        );
    }
}

// --- SIGNAL CARDS ---

pub(crate) fn sync_signal_card(
    tree: &mut WidgetTree,
    side: Side,
    signal: Option<&Signal>,
    last_price: Option<f64>,
    stop_loss: Option<&StopLossInfo>,
) {
    let active = signal.is_some_and(|s| s.active);

    tree.set(
        ids::signal_card(side),
        WidgetState::classed(
            "",
            if active { "signal-card active" } else { "signal-card" },
        ),
    );
    tree.set(
        ids::card_price(side),
        WidgetState::text(pos_dp(signal.and_then(|s| s.price), 2)),
    );
    tree.set(
        ids::card_rsi(side),
        WidgetState::text(pos_dp(signal.and_then(|s| s.rsi), 2)),
    );
    tree.set(
        ids::card_macd(side),
        WidgetState::text(opt_dp(signal.and_then(|s| s.macd), 5)),
    );

    let id_text = signal
        .and_then(|s| s.id)
        .filter(|id| *id > 0)
        .map(|id| id.to_string())
        .unwrap_or_else(|| "--".to_string());
    tree.set(ids::card_signal_num(side), WidgetState::text(id_text));

    let time_text = signal
        .and_then(|s| s.time_iso.as_deref())
        .filter(|t| !t.is_empty())
        .map(format_time)
        .unwrap_or_else(|| "--".to_string());
    tree.set(ids::card_time(side), WidgetState::text(time_text));

    tree.set(
        ids::card_status(side),
        if active {
            WidgetState::classed("ACTIVO", "text-success fw-bold")
        } else {
            WidgetState::text("INACTIVO")
        },
    );

    sync_card_risk(tree, side, active, last_price, stop_loss);
}

/// The per-card risk sub-panel. Only revealed when the card is active, the
/// stop-loss info belongs to this side, and all three prices are usable.
fn sync_card_risk(
    tree: &mut WidgetTree,
    side: Side,
    card_active: bool,
    last_price: Option<f64>,
    stop_loss: Option<&StopLossInfo>,
) {
    let shown = stop_loss.filter(|sl| {
        card_active && sl.active && sl.is_buy == side.is_buy()
    });

    let prices = shown.and_then(|sl| {
        let entry = sl.entry_price.filter(|p| p.is_finite() && *p > 0.0)?;
        let stop = sl.stop_loss.filter(|p| p.is_finite())?;
        let current = last_price.filter(|p| p.is_finite())?;
        Some((sl, entry, stop, current))
    });

    let Some((sl, entry, stop, current)) = prices else {
        tree.set(ids::card_risk_info(side), WidgetState::hidden());
        tree.set(ids::card_stop_loss(side), WidgetState::hidden());
        tree.set(ids::card_take_profit(side), WidgetState::hidden());
        tree.set(ids::card_progress(side), WidgetState::hidden());
        tree.set(ids::card_distance(side), WidgetState::hidden());
        return;
    };

    // Distance is rounded to 2 dp before the band comparison so the shown
    // number and the coloring always agree.
    let distance_pct = ((current - stop).abs() / entry * 100.0 * 100.0).round() / 100.0;
    let tone = if distance_pct < TUNING.stop_risk.danger_pct {
        Tone::Danger
    } else if distance_pct < TUNING.stop_risk.warning_pct {
        Tone::Warning
    } else {
        Tone::Success
    };

    tree.set(ids::card_risk_info(side), WidgetState::classed("", "risk-info"));
    tree.set(ids::card_stop_loss(side), WidgetState::text(dp(stop, 4)));
    tree.set(
        ids::card_take_profit(side),
        WidgetState::text(opt_dp(sl.take_profit, 4)),
    );
    tree.set(
        ids::card_progress(side),
        WidgetState::bar((distance_pct * 2.0).min(100.0), tone.bar()),
    );
    tree.set(
        ids::card_distance(side),
        WidgetState::classed(
            format!("Precio actual: {} ({}% al SL)", dp(current, 4), dp(distance_pct, 2)),
            tone.text(),
        ),
    );
}

// --- INDICATOR GAUGES ---

pub(crate) fn sync_gauges(tree: &mut WidgetTree, snapshot: &Snapshot) {
    sync_rsi_gauge(tree, snapshot.gauge_rsi());
    sync_macd_gauge(tree, snapshot.gauge_macd(), snapshot.gauge_macd_signal());
    sync_adx_gauge(tree, snapshot.gauge_adx());
    sync_atr_gauge(tree, snapshot.gauge_atr(), snapshot.last_price);
}

fn sync_rsi_gauge(tree: &mut WidgetTree, rsi: Option<f64>) {
    // Absent RSI shows the neutral midpoint, not a coerced zero
    let Some(rsi) = rsi else {
        tree.set(ids::RSI_VALUE, WidgetState::text("50.00"));
        tree.set(ids::RSI_BAR, WidgetState::bar(50.0, Tone::Warning.bar()));
        tree.set(
            ids::RSI_STATUS,
            WidgetState::classed("Neutral - Mercado en equilibrio", Tone::Warning.alert()),
        );
        return;
    };

    let (tone, interpretation) = if rsi <= TUNING.thresholds.rsi_oversold {
        (Tone::Danger, "Sobrevendido - Posible oportunidad de compra")
    } else if rsi >= TUNING.thresholds.rsi_overbought {
        (Tone::Success, "Sobrecomprado - Posible oportunidad de venta")
    } else {
        (Tone::Warning, "Neutral - Mercado en equilibrio")
    };

    tree.set(ids::RSI_VALUE, WidgetState::text(dp(rsi, 2)));
    tree.set(ids::RSI_BAR, WidgetState::bar(bar_pct(rsi), tone.bar()));
    tree.set(ids::RSI_STATUS, WidgetState::classed(interpretation, tone.alert()));
}

fn sync_macd_gauge(tree: &mut WidgetTree, macd: Option<f64>, macd_signal: Option<f64>) {
    tree.set(ids::MACD_VALUE, WidgetState::text(opt_dp(macd, 6)));
    tree.set(ids::MACD_SIGNAL_VALUE, WidgetState::text(opt_dp(macd_signal, 6)));

    let (tone, interpretation) = match (macd, macd_signal) {
        (Some(m), Some(s)) if m > s => (
            Tone::Success,
            "Señal alcista: MACD por encima de la línea de señal",
        ),
        (Some(m), Some(s)) if m < s => (
            Tone::Danger,
            "Señal bajista: MACD por debajo de la línea de señal",
        ),
        // Equal or not fully known: a potential cross either way
        _ => (Tone::Warning, "Cruce potencial: MACD cerca de la línea de señal"),
    };
    tree.set(ids::MACD_STATUS, WidgetState::classed(interpretation, tone.alert()));
}

fn sync_adx_gauge(tree: &mut WidgetTree, adx: Option<f64>) {
    let value = adx.unwrap_or(0.0);
    let (tone, interpretation) = if value >= TUNING.gauges.adx_strong {
        (Tone::Success, "Tendencia muy fuerte - Buenas condiciones para trading")
    } else if value >= TUNING.gauges.adx_moderate {
        (Tone::Warning, "Tendencia moderada - Considerar operaciones con precaución")
    } else {
        (Tone::Danger, "Tendencia débil - Mercado lateral, trading riesgoso")
    };

    tree.set(ids::ADX_VALUE, WidgetState::text(opt_dp(adx, 2)));
    tree.set(
        ids::ADX_BAR,
        WidgetState::bar((value / TUNING.gauges.adx_strong * 100.0).min(100.0), tone.bar()),
    );
    tree.set(ids::ADX_STATUS, WidgetState::classed(interpretation, tone.alert()));
}

fn sync_atr_gauge(tree: &mut WidgetTree, atr: Option<f64>, last_price: Option<f64>) {
    let value = atr.unwrap_or(0.0);
    // ATR is normalized to a percentage of the price; without a usable price
    // the divisor degrades to 1 so the gauge still renders something sane.
    let price = last_price.filter(|p| p.is_finite() && *p > 0.0).unwrap_or(1.0);
    let atr_pct = value / price * 100.0;

    let (tone, interpretation) = if atr_pct < TUNING.gauges.atr_calm_pct {
        (Tone::Success, "Volatilidad baja - Condiciones estables para trading")
    } else if atr_pct < TUNING.gauges.atr_moderate_pct {
        (Tone::Warning, "Volatilidad moderada - Ajustar stop loss según corresponda")
    } else {
        (Tone::Danger, "Volatilidad alta - Precaución, mayor riesgo")
    };

    tree.set(ids::ATR_VALUE, WidgetState::text(opt_dp(atr, 6)));
    tree.set(
        ids::ATR_BAR,
        WidgetState::bar((atr_pct * 20.0).min(100.0), tone.bar()),
    );
    tree.set(ids::ATR_STATUS, WidgetState::classed(interpretation, tone.alert()));
}

// --- AI PREDICTION PANEL ---

fn confidence_tone(confidence_pct: f64) -> Tone {
    let bands = &TUNING.confidence;
    if confidence_pct >= bands.strong {
        Tone::Success
    } else if confidence_pct >= bands.moderate {
        Tone::Info
    } else if confidence_pct >= bands.weak {
        Tone::Warning
    } else {
        Tone::Danger
    }
}

pub(crate) fn sync_ai_panel(tree: &mut WidgetTree, ai: Option<&AiPrediction>) {
    let direction = ai.and_then(|a| a.direction_text());
    let direction_lower = direction.map(str::to_lowercase).unwrap_or_default();
    let is_bullish = direction_lower.contains("alcista");
    let is_bearish = direction_lower.contains("bajista");

    tree.set(
        ids::AI_PREDICTION_VALUE,
        WidgetState::classed(
            direction.unwrap_or("Analizando..."),
            if is_bullish {
                "metric-value text-success"
            } else if is_bearish {
                "metric-value text-danger"
            } else {
                "metric-value"
            },
        ),
    );

    let confidence = ai
        .and_then(|a| a.confidence)
        .map(|c| (c * 100.0).clamp(0.0, 100.0))
        .unwrap_or(0.0);
    let tone = confidence_tone(confidence);
    let badge_text = format!("Confianza: {}%", dp(confidence, 1));

    tree.set(
        ids::AI_CONFIDENCE_BAR,
        WidgetState::bar(confidence, tone.bar()).with_tooltip(badge_text.clone()),
    );
    tree.set(ids::AI_CONFIDENCE_BADGE, WidgetState::classed(badge_text, tone.badge()));

    let (action, reason, flavor) = ai_action(ai.is_some(), is_bullish, is_bearish, confidence);
    tree.set(ids::AI_ACTION_TEXT, WidgetState::text(action));
    tree.set(ids::AI_ACTION_REASON, WidgetState::text(reason));
    tree.set(
        ids::AI_RECOMMENDATION,
        WidgetState::classed("", format!("alert text-center mb-0 {flavor}")),
    );

    let pct_metric = |v: Option<f64>| {
        v.filter(|x| x.is_finite())
            .map(|x| format!("{}%", dp(x * 100.0, 1)))
            .unwrap_or_else(|| "--".to_string())
    };
    tree.set(
        ids::AI_ACCURACY,
        WidgetState::text(pct_metric(ai.and_then(|a| a.accuracy))),
    );
    tree.set(
        ids::AI_SUCCESS_RATE,
        WidgetState::text(pct_metric(ai.and_then(|a| a.success_rate))),
    );
}

/// The direction × confidence action matrix.
fn ai_action(
    has_data: bool,
    is_bullish: bool,
    is_bearish: bool,
    confidence: f64,
) -> (&'static str, &'static str, &'static str) {
    let bands = &TUNING.confidence;

    if !has_data {
        return ("Esperar", "Esperando datos de la IA...", "alert-secondary");
    }

    if is_bullish {
        if confidence >= bands.strong {
            ("🔥 COMPRAR FUERTE", "Señal de compra con alta confianza", "alert-success")
        } else if confidence >= bands.moderate {
            ("✅ COMPRAR", "Señal de compra con confianza moderada", "alert-success")
        } else if confidence >= bands.weak {
            ("⚠️ COMPRAR CON CUIDADO", "Señal de compra con baja confianza", "alert-warning")
        } else {
            ("❌ NO COMPRAR", "Señal de compra con muy baja confianza", "alert-danger")
        }
    } else if is_bearish {
        if confidence >= bands.strong {
            ("🔥 VENDER FUERTE", "Señal de venta con alta confianza", "alert-danger")
        } else if confidence >= bands.moderate {
            ("✅ VENDER", "Señal de venta con confianza moderada", "alert-danger")
        } else if confidence >= bands.weak {
            ("⚠️ VENDER CON CUIDADO", "Señal de venta con baja confianza", "alert-warning")
        } else {
            ("❌ NO VENDER", "Señal de venta con muy baja confianza", "alert-secondary")
        }
    } else {
        (
            "Esperar",
            "No hay suficiente información para tomar una decisión",
            "alert-secondary",
        )
    }
}

// --- RISK PANEL ---

pub(crate) fn sync_risk_panel(
    tree: &mut WidgetTree,
    risk: Option<&RiskInfo>,
    last_price: Option<f64>,
) {
    let ratio = risk.and_then(|r| r.risk_reward_ratio).unwrap_or(2.0);
    tree.set(ids::RISK_REWARD_RATIO, WidgetState::text(dp(ratio, 2)));

    // Displayed sizing figure, from the fixed reference-account arithmetic
    let sizing = &TUNING.sizing;
    let size = match last_price.filter(|p| p.is_finite() && *p > 0.0) {
        Some(price) => {
            let risk_amount = sizing.account_notional * sizing.risk_fraction;
            let stop_distance = sizing.stop_fraction * price;
            dp(risk_amount / stop_distance, 4)
        }
        None => "0.0000".to_string(),
    };
    tree.set(ids::POSITION_SIZE, WidgetState::text(format!("{size} BTC")));

    let trade_risk = risk.and_then(|r| r.trade_risk).unwrap_or(1.0);
    tree.set(ids::TRADE_RISK, WidgetState::text(format!("{}%", dp(trade_risk, 2))));
}

// --- VOLUME PANEL ---

pub(crate) fn sync_volume_panel(tree: &mut WidgetTree, volume: Option<&VolumeInfo>) {
    let ratio = volume.and_then(|v| v.ratio).unwrap_or(1.0);
    let current = volume.and_then(|v| v.current_volume).unwrap_or(0.0);
    let average = volume.and_then(|v| v.average_volume).unwrap_or(0.0);
    let percentile = volume.and_then(|v| v.percentile).unwrap_or(0.0) * 100.0;
    let momentum = volume.and_then(|v| v.momentum).unwrap_or(0.0);

    let bands = &TUNING.volume;
    let bar_tone = if ratio > bands.surge {
        Tone::Danger
    } else if ratio > bands.elevated {
        Tone::Warning
    } else if ratio > bands.above_average {
        Tone::Success
    } else {
        Tone::Secondary
    };

    tree.set(ids::VOLUME_RATIO_VALUE, WidgetState::text(format!("{}x", dp(ratio, 2))));
    tree.set(
        ids::VOLUME_RATIO_BAR,
        WidgetState::bar((ratio * 50.0).clamp(5.0, 100.0), bar_tone.bar()),
    );
    tree.set(ids::CURRENT_VOLUME, WidgetState::text(dp(current, 4)));
    tree.set(ids::AVERAGE_VOLUME, WidgetState::text(dp(average, 4)));

    let percentile_class = if percentile > bands.percentile_hot {
        "small text-danger fw-bold"
    } else if percentile > bands.percentile_warm {
        "small text-warning"
    } else {
        "small text-muted"
    };
    tree.set(
        ids::VOLUME_PERCENTILE,
        WidgetState::classed(format!("Percentil: {}%", dp(percentile, 1)), percentile_class),
    );

    let (arrow, momentum_tone) = if momentum > 0.0 {
        ("↑", Tone::Success)
    } else if momentum < 0.0 {
        ("↓", Tone::Danger)
    } else {
        ("→", Tone::Muted)
    };
    tree.set(
        ids::VOLUME_MOMENTUM,
        WidgetState::classed(
            format!("Tendencia: {arrow} {}%", dp(momentum.abs(), 2)),
            momentum_tone.text(),
        ),
    );

    // Five-band alert / trend table
    let (alert, trend) = if ratio > bands.surge {
        (
            Some((Tone::Danger, "¡Volumen muy alto! Podría indicar movimiento fuerte.")),
            "Volumen significativamente por encima del promedio",
        )
    } else if ratio > bands.elevated {
        (
            Some((Tone::Warning, "Volumen alto detectado")),
            "Volumen por encima del promedio",
        )
    } else if ratio > bands.above_average {
        (None, "Volumen ligeramente por encima del promedio")
    } else if ratio > bands.normal_floor {
        (None, "Volumen dentro del rango normal")
    } else {
        (
            Some((Tone::Info, "Volumen por debajo del promedio")),
            "Bajo volumen de operaciones",
        )
    };

    tree.set(
        ids::VOLUME_ALERT,
        match alert {
            Some((tone, text)) => WidgetState::classed(text, tone.alert()),
            None => WidgetState::hidden(),
        },
    );
    tree.set(ids::VOLUME_TREND, WidgetState::text(trend));
}

// --- MARKET-CONTEXT PANEL ---

pub(crate) fn sync_market_context(tree: &mut WidgetTree, snapshot: &Snapshot) {
    let Some(context) = snapshot.market_context.as_ref() else {
        // No context at all: loading badges plus whatever flat trend status
        // the producer mirrored
        let loading = || WidgetState::classed("Cargando...", Tone::Secondary.badge());
        tree.set(ids::SIDEWAYS_BADGE, loading());
        tree.set(ids::SENTIMENT_BADGE, loading());
        tree.set(ids::VOLATILITY_BADGE, loading());
        tree.set(ids::CRISIS_BADGE, loading());
        tree.set(ids::MARKET_TREND_BADGE, loading());
        tree.set(
            ids::TREND_STATUS_VALUE,
            WidgetState::text(snapshot.trend_status.as_deref().unwrap_or("Indeterminado")),
        );
        tree.set(
            ids::BLOCKED_REASONS_LIST,
            WidgetState::body(
                vec!["Condiciones óptimas para trading".to_string()],
                Tone::Success.text(),
            ),
        );
        tree.set(ids::MARKET_DETAILS, WidgetState::hidden());
        return;
    };

    // Badges
    let sideways = context.sideways_flag();
    tree.set(
        ids::SIDEWAYS_BADGE,
        WidgetState::classed(
            if sideways { "Lateral" } else { "Tendencial" },
            if sideways { Tone::Warning.badge() } else { Tone::Success.badge() },
        ),
    );

    let (sentiment_text, sentiment_tone) = match context.sentiment.as_deref() {
        Some("Positivo") => ("Positivo", Tone::Success),
        Some("Negativo") => ("Negativo", Tone::Danger),
        Some(other) => (other, Tone::Warning),
        None => ("Neutral", Tone::Warning),
    };
    tree.set(
        ids::SENTIMENT_BADGE,
        WidgetState::classed(sentiment_text, sentiment_tone.badge()),
    );

    let volatility_ratio = context
        .volatility
        .as_ref()
        .and_then(|v| v.volatility_ratio)
        .unwrap_or(1.0);
    let (volatility_label, volatility_tone) = volatility_band(volatility_ratio);
    tree.set(
        ids::VOLATILITY_BADGE,
        WidgetState::classed(volatility_label, volatility_tone.badge()),
    );

    let crisis = context.crisis_flag();
    tree.set(
        ids::CRISIS_BADGE,
        WidgetState::classed(
            if crisis { "CRISIS" } else { "Normal" },
            if crisis { Tone::Danger.badge() } else { Tone::Success.badge() },
        ),
    );

    // Blocked reasons
    let reasons = context.blocking_reasons();
    tree.set(
        ids::BLOCKED_REASONS_LIST,
        if reasons.is_empty() {
            WidgetState::body(
                vec!["Condiciones óptimas para trading".to_string()],
                Tone::Success.text(),
            )
        } else {
            WidgetState::body(reasons.to_vec(), Tone::Danger.text())
        },
    );

    // Trend heading and badge
    let trend = context.trend.as_ref();
    let direction = trend
        .and_then(|t| t.direction.as_deref())
        .unwrap_or("Indeterminado");
    let strength = trend.and_then(|t| t.strength.as_deref()).unwrap_or("N/A");
    tree.set(
        ids::TREND_STATUS_VALUE,
        WidgetState::body(
            vec![direction.to_string(), format!("Fuerza: {strength}")],
            "",
        ),
    );

    let badge = match direction.to_lowercase().as_str() {
        "alcista" => WidgetState::classed(
            format!("📈 {direction} ({strength})"),
            Tone::Success.badge(),
        ),
        "bajista" => WidgetState::classed(
            format!("📉 {direction} ({strength})"),
            Tone::Danger.badge(),
        ),
        "lateral" => WidgetState::classed(
            format!("➡️ {direction} ({strength})"),
            "badge bg-warning text-dark",
        ),
        _ => WidgetState::classed("Analizando...", Tone::Secondary.badge()),
    };
    tree.set(ids::MARKET_TREND_BADGE, badge);

    // Details body
    let mut lines = vec![
        format!(
            "Volatilidad: {} (Ratio: {}x)",
            volatility_label,
            dp(volatility_ratio, 2)
        ),
        format!(
            "ADX: {}",
            trend
                .and_then(|t| t.adx)
                .map(|a| dp(a, 2))
                .unwrap_or_else(|| "N/A".to_string())
        ),
        format!("Mercado Lateral: {}", if sideways { "Sí" } else { "No" }),
        format!(
            "Estado del Mercado: {}",
            if context.can_trade {
                "Óptimo para trading"
            } else {
                "Trading no recomendado"
            }
        ),
    ];
    if !reasons.is_empty() {
        lines.push(format!("Razones de bloqueo: {}", reasons.iter().join(", ")));
    }
    if let Some(crisis_info) = context.crisis.as_ref().filter(|c| c.is_crisis) {
        lines.push(format!(
            "Crisis detectada: Confianza {}%",
            dp(crisis_info.confidence.unwrap_or(0.0) * 100.0, 1)
        ));
        if !crisis_info.reasons.is_empty() {
            lines.push(format!("Razones: {}", crisis_info.reasons.iter().join(", ")));
        }
    }
    tree.set(
        ids::MARKET_DETAILS,
        WidgetState::body(lines, volatility_tone.alert()),
    );
}

fn volatility_band(ratio: f64) -> (&'static str, Tone) {
    if ratio > TUNING.context.volatility_high {
        ("Alta", Tone::Danger)
    } else if ratio > TUNING.context.volatility_medium {
        ("Media", Tone::Warning)
    } else {
        ("Baja", Tone::Success)
    }
}

// --- RECOMMENDATION PANEL ---

pub(crate) fn sync_recommendations(
    tree: &mut WidgetTree,
    snapshot: &Snapshot,
    recommendations: &[Recommendation],
) {
    let mut lines = indicator_summary_lines(snapshot);

    if recommendations.is_empty() {
        lines.push("Sin señales activas".to_string());
        lines.push(
            "El bot está monitoreando el mercado en busca de oportunidades de trading."
                .to_string(),
        );
        tree.set(ids::RECOMMENDATIONS, WidgetState::body(lines, "alert alert-info"));
        return;
    }

    for rec in recommendations {
        lines.push(rec.title.clone());
        lines.push(format!("{} - Fuerza: {}%", rec.time, rec.strength));
        lines.push(format!("Precio: {} USDT", dp(rec.price, 2)));
        lines.extend(rec.analysis_lines.iter().cloned());
    }
    lines.push(
        "Advertencia de riesgo: Las señales de trading no son una garantía de rendimiento. \
         Siempre realice su propio análisis y gestione el riesgo adecuadamente."
            .to_string(),
    );
    tree.set(ids::RECOMMENDATIONS, WidgetState::body(lines, ""));
}

/// The technical-indicator block heading the panel. These lines keep the
/// producer's zero-coercion display (absent renders as `0.00`), matching the
/// panel's character as a prose summary rather than a gauge.
fn indicator_summary_lines(snapshot: &Snapshot) -> Vec<String> {
    let ind = snapshot.indicators.as_ref();
    let num = |v: Option<f64>, decimals: usize| dp(v.unwrap_or(0.0), decimals);

    let mut lines = vec![
        "Indicadores Técnicos".to_string(),
        format!("RSI: {}", num(ind.and_then(|i| i.rsi), 2)),
        format!(
            "ADX: {} ({})",
            num(ind.and_then(|i| i.adx), 2),
            ind.and_then(|i| i.trend_strength.as_deref()).unwrap_or("N/A")
        ),
        format!("MACD: {}", num(ind.and_then(|i| i.macd), 4)),
        format!("Señal MACD: {}", num(ind.and_then(|i| i.macd_signal), 4)),
        format!("SMA 20: {}", num(ind.and_then(|i| i.sma_20), 2)),
        format!("SMA 50: {}", num(ind.and_then(|i| i.sma_50), 2)),
        format!("ATR: {}", num(ind.and_then(|i| i.atr), 2)),
    ];

    if let Some(ai) = ind.and_then(|i| i.ai_prediction.as_ref()) {
        lines.push(format!(
            "Predicción IA: {}",
            ai.direction_text().unwrap_or("N/A")
        ));
        lines.push(format!(
            "Cambio: {}%",
            dp(ai.change.unwrap_or(0.0) * 100.0, 4)
        ));
        lines.push(format!(
            "Confianza: {}%",
            dp(ai.confidence.unwrap_or(0.0) * 100.0, 2)
        ));
    }

    lines
}

// --- TRADE HISTORY + BALANCE ---

pub(crate) fn sync_trade_history(
    tree: &mut WidgetTree,
    trading: Option<&TradingInfo>,
    account: Option<&AccountInfo>,
) {
    let mut trades = trading.map(|t| t.recent_trades.clone()).unwrap_or_default();

    if trades.is_empty() {
        tree.set(
            ids::TRADING_HISTORY,
            WidgetState::body(vec!["No hay operaciones recientes".to_string()], Tone::Muted.text()),
        );
    } else {
        // Newest first; entry_time is ISO-8601 so the string order is the
        // chronological order
        trades.sort_by(|a, b| b.entry_time.cmp(&a.entry_time));

        let mut lines = Vec::with_capacity(trades.len() * 2);
        for trade in &trades {
            let pnl = trade.pnl.unwrap_or(0.0);
            lines.push(format!(
                "{} | {} | {} USDT | {}",
                trade.symbol.as_deref().unwrap_or("--"),
                trade
                    .entry_time
                    .as_deref()
                    .map(format_time)
                    .unwrap_or_else(|| "--".to_string()),
                signed_dp(pnl, 2),
                trade.status.as_deref().unwrap_or("--"),
            ));
            lines.push(format!(
                "Entrada: {} | Salida: {} | Tamaño: {}",
                opt_dp(trade.entry_price, 2),
                trade
                    .exit_price
                    .filter(|p| p.is_finite())
                    .map(|p| dp(p, 2))
                    .unwrap_or_else(|| "Pendiente".to_string()),
                opt_dp(trade.size, 4),
            ));
        }
        tree.set(ids::TRADING_HISTORY, WidgetState::body(lines, ""));
    }

    // Balance: the producer's figure when present, otherwise the demo
    // account reconstruction
    let balance = account.and_then(|a| a.balance).unwrap_or_else(|| {
        let total_pnl: f64 = trades.iter().filter_map(|t| t.pnl).sum();
        TUNING.sizing.demo_start_balance + total_pnl
    });
    tree.set(ids::ACCOUNT_BALANCE, WidgetState::text(dp(balance, 2)));
}
