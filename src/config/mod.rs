//! Configuration module for the climate insight toolkit.

pub mod analysis;
pub mod extremes;
pub mod persistence;

mod debug; // Private: use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig, HorizonConfig};
pub use extremes::{EXTREMES, ExtremeThresholds};
pub use persistence::{PERSISTENCE, cleaned_climate_path};
