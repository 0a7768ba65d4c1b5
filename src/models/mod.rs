// Result models produced by the analysis pipeline
// Pure data: no I/O, no rendering

pub mod correlation;
pub mod forecast;

// Re-export key types for convenience
pub use correlation::{CorrelationResult, CorrelationStrength, UndefinedReason};
pub use forecast::{ForecastResult, TrendLine};
