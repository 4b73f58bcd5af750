//! Display formatting for dashboard values
//!
//! Every widget renders numbers through these helpers so the absent-value
//! behavior stays uniform: a missing or non-finite number formats as the
//! placeholder, never as a coerced zero.

use chrono::{DateTime, Local, NaiveDateTime};

/// What a widget shows when the backing value is absent.
pub const PLACEHOLDER: &str = "--";

/// Fixed-precision decimal, e.g. `dp(1.005, 2)` -> `"1.00"` (ties to even per rustc).
pub fn dp(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Decimal for an optional value; placeholder for `None` and non-finite.
pub fn opt_dp(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => dp(v, decimals),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Like [`opt_dp`] but also treats zero and negative as absent.
/// Signal cards use this for price and RSI, where 0 means "never set".
pub fn pos_dp(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => dp(v, decimals),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Signed decimal with an explicit `+` on gains, e.g. trade pnl `+2.35`.
pub fn signed_dp(value: f64, decimals: usize) -> String {
    if value > 0.0 {
        format!("+{value:.decimals$}")
    } else {
        dp(value, decimals)
    }
}

/// Progress-bar width, pinned to the 0..=100 range.
pub fn bar_pct(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Render an ISO-8601 timestamp as `dd/mm/yyyy hh:mm AM|PM`.
///
/// The producer emits naive local timestamps (`2024-05-14T08:30:00.123456`);
/// zoned RFC 3339 strings are accepted too. Empty input renders the
/// placeholder and anything unparseable is returned verbatim so the user at
/// least sees what arrived.
pub fn format_time(iso: &str) -> String {
    if iso.is_empty() {
        return PLACEHOLDER.to_string();
    }

    const DISPLAY: &str = "%d/%m/%Y %I:%M %p";

    if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(DISPLAY).to_string();
    }
    if let Ok(zoned) = DateTime::parse_from_rfc3339(iso) {
        return zoned.format(DISPLAY).to_string();
    }

    iso.to_string()
}

/// Wall-clock stamp for the "last updated" widget.
pub fn clock_stamp(now: &DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opt_dp_placeholder_for_absent_and_non_finite() {
        assert_eq!(opt_dp(None, 2), "--");
        assert_eq!(opt_dp(Some(f64::NAN), 2), "--");
        assert_eq!(opt_dp(Some(f64::INFINITY), 2), "--");
        assert_eq!(opt_dp(Some(0.0), 2), "0.00");
        assert_eq!(opt_dp(Some(1.23456), 4), "1.2346");
    }

    #[test]
    fn test_pos_dp_rejects_zero_and_negative() {
        assert_eq!(pos_dp(Some(0.0), 2), "--");
        assert_eq!(pos_dp(Some(-5.0), 2), "--");
        assert_eq!(pos_dp(Some(42_000.5), 2), "42000.50");
    }

    #[test]
    fn test_signed_dp() {
        assert_eq!(signed_dp(2.35, 2), "+2.35");
        assert_eq!(signed_dp(-1.2, 2), "-1.20");
        assert_eq!(signed_dp(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_time_naive_iso() {
        assert_eq!(format_time("2024-05-14T08:30:00.123456"), "14/05/2024 08:30 AM");
        assert_eq!(format_time("2024-05-14T20:30:00"), "14/05/2024 08:30 PM");
    }

    #[test]
    fn test_format_time_fallbacks() {
        assert_eq!(format_time(""), "--");
        // Not a date: hand the raw string back instead of guessing
        assert_eq!(format_time("hace un momento"), "hace un momento");
    }

    #[test]
    fn test_bar_pct_clamps() {
        assert_eq!(bar_pct(-10.0), 0.0);
        assert_eq!(bar_pct(150.0), 100.0);
        assert_eq!(bar_pct(62.5), 62.5);
    }
}
