pub mod fmt;

// Re-export commonly used helpers
pub use fmt::{PLACEHOLDER, bar_pct, clock_stamp, dp, format_time, opt_dp, pos_dp, signed_dp};
