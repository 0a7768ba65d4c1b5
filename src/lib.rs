#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod utils;

// Dashboard pages and their presentation
pub mod commands;
pub mod insights;
pub mod render;

// Re-export commonly used types
pub use analysis::{aggregate, correlate, correlate_with_p_value, fit_trend, forecast};
pub use domain::{ClimateVariable, Reducer, TimePoint, YearlySeries};
pub use error::{AnalysisError, DataError, InsightError};
pub use models::{CorrelationResult, ForecastResult, TrendLine};
pub use render::OutputFormat;

// CLI argument parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ANALYSIS, PERSISTENCE};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Yearly climate, agriculture and environment insights for Nepal", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Collapse a dated CSV series into one value per year
    Aggregate {
        input: PathBuf,
        #[arg(long)]
        value_column: String,
        #[arg(long, default_value = "Date")]
        date_column: String,
        #[arg(long, value_enum, default_value_t = Reducer::Mean)]
        reducer: Reducer,
    },
    /// Fit a linear trend to yearly values and extrapolate it
    Forecast {
        input: PathBuf,
        #[arg(long)]
        value_column: String,
        #[arg(long, default_value = "Year")]
        year_column: String,
        #[arg(long)]
        horizon: i32,
    },
    /// Pearson correlation of two yearly series over their shared years
    Correlate {
        left: PathBuf,
        right: PathBuf,
        #[arg(long)]
        left_column: String,
        #[arg(long)]
        right_column: String,
        #[arg(long, default_value = "Year")]
        year_column: String,
        /// Also report the two-sided p-value
        #[arg(long, default_value_t = false)]
        p_value: bool,
    },
    /// Forecast the yearly mean of a climate variable
    ClimatePrediction {
        #[arg(long)]
        climate: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ClimateVariable::Temperature)]
        variable: ClimateVariable,
        #[arg(long, default_value_t = ANALYSIS.forecast.climate_horizon.default_year)]
        horizon: i32,
    },
    /// Forecast the production of one crop
    CropForecast {
        #[arg(long, default_value = PERSISTENCE.processed.agriculture)]
        agriculture: PathBuf,
        #[arg(long)]
        crop: String,
        #[arg(long, default_value_t = ANALYSIS.forecast.crop_horizon.default_year)]
        horizon: i32,
    },
    /// Correlate a climate variable with crop production (all crops when --crop is omitted)
    ClimateAgriculture {
        #[arg(long)]
        climate: Option<PathBuf>,
        #[arg(long, default_value = PERSISTENCE.processed.agriculture)]
        agriculture: PathBuf,
        #[arg(long, value_enum, default_value_t = ClimateVariable::Temperature)]
        variable: ClimateVariable,
        #[arg(long)]
        crop: Option<String>,
    },
    /// Relate glacier area to yearly weather extremes
    GlacierWeather {
        #[arg(long, default_value = PERSISTENCE.raw.glacier_areas)]
        glacier: PathBuf,
        #[arg(long)]
        climate: Option<PathBuf>,
    },
    /// Total glacier area per survey year
    GlacierRetreat {
        #[arg(long, default_value = PERSISTENCE.raw.glacier_areas)]
        glacier: PathBuf,
    },
    /// Extreme weather days per year
    Extremes {
        #[arg(long)]
        climate: Option<PathBuf>,
    },
    /// Yearly mean temperature
    TemperatureTrend {
        #[arg(long)]
        climate: Option<PathBuf>,
    },
    /// Total precipitation per year
    Precipitation {
        #[arg(long)]
        climate: Option<PathBuf>,
    },
    /// Production per year for the given crops (all crops when none are given)
    Crops {
        #[arg(long, default_value = PERSISTENCE.processed.agriculture)]
        agriculture: PathBuf,
        crops: Vec<String>,
    },
    /// Threatened species counts per year
    Biodiversity {
        #[arg(long, default_value = PERSISTENCE.processed.threatened_species)]
        input: PathBuf,
        species: Vec<String>,
    },
    /// Pixel-wise landcover change between two classified grids
    Landcover {
        #[arg(long, default_value = PERSISTENCE.raw.landcover_before)]
        before: PathBuf,
        #[arg(long, default_value = PERSISTENCE.raw.landcover_after)]
        after: PathBuf,
        #[arg(long, default_value_t = ANALYSIS.landcover.scale_factor)]
        scale_factor: usize,
    },
}

/// Run one subcommand and return its rendered output.
/// This is the public API for the binary to call
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    commands::dispatch(cli)
}
