use serde::Serialize;

use crate::analysis::{aggregate, forecast};
use crate::config::{ANALYSIS, HorizonConfig};
use crate::data::{AgricultureTable, ClimateTable};
use crate::domain::{ClimateVariable, Reducer, YearlySeries};
use crate::error::{AnalysisResult, InsightResult};
use crate::models::ForecastResult;

/// A forecast ready for display: what was forecast, in which unit, and the value at the horizon.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub subject: String,
    pub unit: String,
    pub horizon_value: f64,
    pub forecast: ForecastResult,
}

fn check_horizon(horizon_year: i32, range: &HorizonConfig, subject: &str) {
    if !range.contains(horizon_year) {
        log::warn!(
            "Forecast horizon {} for {} is outside the usual range {}-{}",
            horizon_year,
            subject,
            range.min_year,
            range.max_year
        );
    }
}

/// Forecast any yearly series and label it for display.
pub fn series_forecast(
    subject: impl Into<String>,
    unit: impl Into<String>,
    series: &YearlySeries,
    horizon_year: i32,
) -> AnalysisResult<ForecastReport> {
    let forecast = forecast(series, horizon_year)?;
    Ok(ForecastReport {
        subject: subject.into(),
        unit: unit.into(),
        horizon_value: forecast.trend.predict(horizon_year),
        forecast,
    })
}

/// Yearly mean of a climate variable extrapolated to `horizon_year`.
pub fn climate_prediction(
    climate: &ClimateTable,
    variable: ClimateVariable,
    horizon_year: i32,
) -> InsightResult<ForecastReport> {
    check_horizon(horizon_year, &ANALYSIS.forecast.climate_horizon, variable.label());

    let yearly = aggregate(&climate.points(variable)?, Reducer::Mean);
    Ok(series_forecast(variable.label(), variable.unit(), &yearly, horizon_year)?)
}

/// Yearly production of one crop extrapolated to `horizon_year`.
pub fn crop_forecast(
    agriculture: &AgricultureTable,
    crop: &str,
    horizon_year: i32,
) -> InsightResult<ForecastReport> {
    check_horizon(horizon_year, &ANALYSIS.forecast.crop_horizon, crop);

    let yearly = agriculture.series(crop)?;
    Ok(series_forecast(
        format!("{} production", crop),
        "'000 metric tons",
        &yearly,
        horizon_year,
    )?)
}
