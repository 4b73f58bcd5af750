// The refresh scheduler
pub mod scheduler;

// Re-export commonly used types
pub use scheduler::{DeckEngine, Phase};
