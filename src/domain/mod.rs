// Domain types and the wire schema
pub mod side;
pub mod snapshot;

// Re-export commonly used types
pub use side::Side;
pub use snapshot::{
    AccountInfo, AiPrediction, GraphPayload, IndicatorSet, MarketContext, RiskInfo, Signal,
    Snapshot, StopLossInfo, TradeRecord, TradingInfo, VolumeInfo,
};
