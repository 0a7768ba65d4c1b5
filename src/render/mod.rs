// Presentation boundary: reports to text or JSON, failures to neutral warnings
pub mod config;
pub mod reports;
pub mod table;
pub mod utils;

use serde::Serialize;

use crate::error::AnalysisError;
use crate::models::UndefinedReason;

// Re-export commonly used items
pub use config::{RENDER_TEXT, RenderText};
pub use reports::{TextReport, correlation_line};
pub use table::TextTable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render<T: Serialize + TextReport>(
    report: &T,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(report.to_text()),
        OutputFormat::Json if pretty => serde_json::to_string_pretty(report),
        OutputFormat::Json => serde_json::to_string(report),
    }
}

/// Neutral message for a failed computation. Never exposes internal detail.
pub fn analysis_warning(error: &AnalysisError) -> &'static str {
    match error {
        AnalysisError::InsufficientData { .. } => RENDER_TEXT.not_enough_for_trend,
        AnalysisError::InvalidHorizon { .. } => RENDER_TEXT.horizon_before_data,
        AnalysisError::DuplicateYear { .. } => RENDER_TEXT.repeated_year,
        AnalysisError::GridShapeMismatch { .. } => RENDER_TEXT.landcover_shape_mismatch,
        AnalysisError::UnsupportedVariable { .. } => RENDER_TEXT.unsupported_crop_variable,
    }
}

pub fn undefined_warning(reason: &UndefinedReason) -> &'static str {
    match reason {
        UndefinedReason::TooFewPairs { .. } => RENDER_TEXT.not_enough_for_correlation,
        UndefinedReason::ZeroVariance => RENDER_TEXT.constant_series,
    }
}

#[derive(Serialize)]
struct WarningEnvelope<'a> {
    warning: &'a str,
}

pub fn render_warning(message: &str, format: OutputFormat, pretty: bool) -> Result<String, serde_json::Error> {
    let envelope = WarningEnvelope { warning: message };
    match format {
        OutputFormat::Text => Ok(format!("{}: {}", RENDER_TEXT.warning_prefix, message)),
        OutputFormat::Json if pretty => serde_json::to_string_pretty(&envelope),
        OutputFormat::Json => serde_json::to_string(&envelope),
    }
}
