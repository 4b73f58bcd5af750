// Condition evaluation and recommendation composition
pub mod conditions;
pub mod recommend;

// Re-export commonly used types
pub use conditions::{CheckKind, ConditionResult, evaluate};
pub use recommend::{Recommendation, compose};
