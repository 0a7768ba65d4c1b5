//! Subcommand dispatch: load the inputs a page needs, run it, render the outcome.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::{aggregate, aggregate_years};
use crate::config::{ANALYSIS, cleaned_climate_path};
use crate::data::grid::load_grid;
use crate::data::series_file::{load_time_points, load_year_values};
use crate::data::{AgricultureTable, BiodiversityTable, ClimateTable, GlacierInventory};
use crate::domain::{Reducer, YearlySeries};
use crate::error::{AnalysisError, InsightError, InsightResult};
use crate::insights;
use crate::render::{TextReport, analysis_warning, render, render_warning};
use crate::{Cli, Command};

/// Render a page outcome. Analysis failures become a neutral warning;
/// unusable input is returned as an error.
fn emit<T: Serialize + TextReport>(cli: &Cli, outcome: InsightResult<T>) -> Result<String> {
    match outcome {
        Ok(report) => Ok(render(&report, cli.format, cli.pretty)?),
        Err(InsightError::Analysis(e)) => warn(cli, &e),
        Err(InsightError::Data(e)) => Err(e.into()),
    }
}

fn warn(cli: &Cli, error: &AnalysisError) -> Result<String> {
    log::warn!("{}", error);
    Ok(render_warning(analysis_warning(error), cli.format, cli.pretty)?)
}

fn load_climate(path: &Option<PathBuf>) -> Result<ClimateTable> {
    let path = path.clone().unwrap_or_else(cleaned_climate_path);
    ClimateTable::load_clean(&path)
}

fn load_yearly(path: &Path, year_column: &str, value_column: &str) -> Result<YearlySeries> {
    let pairs = load_year_values(path, year_column, value_column)?;
    if pairs.is_empty() {
        log::warn!("No usable rows for '{}' in {}", value_column, path.display());
    }
    // Repeated years in a hand-made file are averaged
    Ok(aggregate_years(&pairs, Reducer::Mean))
}

pub fn dispatch(cli: &Cli) -> Result<String> {
    let survey_years = ANALYSIS.glacier.survey_years;

    match &cli.command {
        Command::Aggregate {
            input,
            value_column,
            date_column,
            reducer,
        } => {
            let points = load_time_points(input, date_column, value_column)?;
            let series = aggregate(&points, *reducer);
            let table = insights::YearlyTable::new(format!("Yearly {} of {}", reducer, value_column), "", series);
            emit(cli, Ok(table))
        }

        Command::Forecast {
            input,
            value_column,
            year_column,
            horizon,
        } => {
            let series = load_yearly(input, year_column, value_column)?;
            let outcome = insights::series_forecast(value_column.as_str(), "", &series, *horizon);
            emit(cli, outcome.map_err(InsightError::from))
        }

        Command::Correlate {
            left,
            right,
            left_column,
            right_column,
            year_column,
            p_value,
        } => {
            let a = load_yearly(left, year_column, left_column)?;
            let b = load_yearly(right, year_column, right_column)?;
            let report = insights::correlate_series((left_column.as_str(), &a), (right_column.as_str(), &b), *p_value);
            emit(cli, Ok(report))
        }

        Command::ClimatePrediction {
            climate,
            variable,
            horizon,
        } => {
            let climate = load_climate(climate)?;
            emit(cli, insights::climate_prediction(&climate, *variable, *horizon))
        }

        Command::CropForecast {
            agriculture,
            crop,
            horizon,
        } => {
            let agriculture = AgricultureTable::load(agriculture)?;
            emit(cli, insights::crop_forecast(&agriculture, crop, *horizon))
        }

        Command::ClimateAgriculture {
            climate,
            agriculture,
            variable,
            crop,
        } => {
            let climate = load_climate(climate)?;
            let agriculture = AgricultureTable::load(agriculture)?;
            match crop {
                Some(crop) => emit(
                    cli,
                    insights::climate_agriculture_correlation(&climate, &agriculture, *variable, crop),
                ),
                None => emit(
                    cli,
                    insights::rank_crop_correlations(&climate, &agriculture, *variable),
                ),
            }
        }

        Command::GlacierWeather { glacier, climate } => {
            let glacier = GlacierInventory::load(glacier)?;
            let climate = load_climate(climate)?;
            emit(cli, insights::glacier_weather(&glacier, &climate, survey_years))
        }

        Command::GlacierRetreat { glacier } => {
            let glacier = GlacierInventory::load(glacier)?;
            emit(cli, Ok(insights::glacier_retreat(&glacier, survey_years)))
        }

        Command::Extremes { climate } => {
            let climate = load_climate(climate)?;
            emit(cli, insights::extreme_event_trend(&climate))
        }

        Command::TemperatureTrend { climate } => {
            let climate = load_climate(climate)?;
            emit(cli, insights::temperature_trend(&climate))
        }

        Command::Precipitation { climate } => {
            let climate = load_climate(climate)?;
            emit(cli, insights::precipitation_totals(&climate))
        }

        Command::Crops { agriculture, crops } => {
            let agriculture = AgricultureTable::load(agriculture)?;
            emit(cli, Ok(insights::crop_trends(&agriculture, crops)))
        }

        Command::Biodiversity { input, species } => {
            let biodiversity = BiodiversityTable::load(input)?;
            emit(cli, Ok(insights::threatened_trend(&biodiversity, species)))
        }

        Command::Landcover {
            before,
            after,
            scale_factor,
        } => {
            let before = load_grid(before).context("Failed to load the earlier landcover map")?;
            let after = load_grid(after).context("Failed to load the later landcover map")?;
            let outcome = insights::landcover_change(&before, &after, *scale_factor);
            emit(cli, outcome.map_err(InsightError::from))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;
    use clap::Parser;
    use std::fs;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("climate-insight").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_defaults() {
        let parsed = cli(&["climate-prediction"]);
        assert_eq!(parsed.format, OutputFormat::Text);
        match parsed.command {
            Command::ClimatePrediction { horizon, climate, .. } => {
                assert_eq!(horizon, 2035);
                assert_eq!(climate, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_aggregate_and_forecast_files() {
        let dir = tempfile::tempdir().unwrap();
        let daily = dir.path().join("daily.csv");
        fs::write(&daily, "Date,Rain\n2000-01-01,1\n2000-02-01,2\n2001-01-01,4\n").unwrap();

        let path = daily.to_string_lossy().to_string();
        let output = dispatch(&cli(&[
            "--format", "json", "aggregate", &path, "--value-column", "Rain", "--reducer", "sum",
        ]))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["series"]["points"][0][1], 3.0);

        let yearly = dir.path().join("yearly.csv");
        fs::write(&yearly, "Year,Area\n2000,10\n2010,20\n").unwrap();
        let path = yearly.to_string_lossy().to_string();
        let output = dispatch(&cli(&[
            "--format", "json", "forecast", &path, "--value-column", "Area", "--horizon", "2030",
        ]))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!((value["horizon_value"].as_f64().unwrap() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_analysis_failure_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let yearly = dir.path().join("single.csv");
        fs::write(&yearly, "Year,Area\n2000,10\n").unwrap();
        let path = yearly.to_string_lossy().to_string();

        let output = dispatch(&cli(&["forecast", &path, "--value-column", "Area", "--horizon", "2030"])).unwrap();
        assert_eq!(output, "Warning: Not enough data points to fit a trend.");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = dispatch(&cli(&["glacier-retreat", "--glacier", "/nonexistent/glaciers.csv"]));
        assert!(result.is_err());
    }
}
