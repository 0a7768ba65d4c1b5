use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::{ChangeSummary, LandcoverGrid, aggregate, count_extreme_days, fit_trend};
use crate::config::EXTREMES;
use crate::data::{AgricultureTable, BiodiversityTable, ClimateTable, GlacierInventory};
use crate::domain::{ClimateVariable, Reducer, YearlySeries};
use crate::error::{AnalysisResult, DataError, InsightResult};
use crate::models::TrendLine;

/// One yearly series with an optional fitted trend.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct YearlyTable {
    pub title: String,
    pub unit: String,
    pub series: YearlySeries,
    /// Absent when there are fewer than two years to fit
    pub trend: Option<TrendLine>,
}

impl YearlyTable {
    pub fn new(title: impl Into<String>, unit: impl Into<String>, series: YearlySeries) -> Self {
        Self {
            title: title.into(),
            unit: unit.into(),
            trend: fit_trend(&series).ok(),
            series,
        }
    }
}

fn climate_table(climate: &ClimateTable, variable: ClimateVariable, reducer: Reducer, title: &str) -> InsightResult<YearlyTable> {
    let series = aggregate(&climate.points(variable)?, reducer);
    Ok(YearlyTable::new(title, variable.unit(), series))
}

/// Yearly mean temperature.
pub fn temperature_trend(climate: &ClimateTable) -> InsightResult<YearlyTable> {
    climate_table(climate, ClimateVariable::Temperature, Reducer::Mean, "Average temperature")
}

/// Total precipitation per year.
pub fn precipitation_totals(climate: &ClimateTable) -> InsightResult<YearlyTable> {
    climate_table(climate, ClimateVariable::Precipitation, Reducer::Sum, "Annual precipitation")
}

// ============================================================================
// Extreme weather days
// ============================================================================

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ExtremeYear {
    pub year: i32,
    pub heatwave_days: Option<u32>,
    pub rainfall_days: Option<u32>,
    pub storm_days: Option<u32>,
}

/// Days per year above each extreme-weather threshold.
///
/// A variable missing from the export leaves its column empty; the report is only an
/// error when none of the three variables is present.
pub fn extreme_event_trend(climate: &ClimateTable) -> InsightResult<Vec<ExtremeYear>> {
    let kinds = [
        (ClimateVariable::Temperature, EXTREMES.heatwave_temp_c),
        (ClimateVariable::Precipitation, EXTREMES.rainfall_mm),
        (ClimateVariable::WindSpeed, EXTREMES.storm_wind_kmh),
    ];

    let mut counts: Vec<Option<YearlySeries>> = Vec::with_capacity(kinds.len());
    for (variable, threshold) in kinds {
        match climate.points(variable) {
            Ok(points) => counts.push(Some(count_extreme_days(&points, threshold))),
            Err(e) => {
                log::warn!("Skipping {} extremes: {}", variable, e);
                counts.push(None);
            }
        }
    }

    if counts.iter().all(Option::is_none) {
        return Err(DataError::MissingColumn {
            column: "extreme weather variables".to_string(),
            tried: kinds
                .iter()
                .flat_map(|(variable, _)| variable.column_aliases())
                .copied()
                .collect::<Vec<_>>()
                .join(", "),
        }
        .into());
    }

    let mut years: BTreeMap<i32, ExtremeYear> = BTreeMap::new();
    for (slot, series) in counts.iter().enumerate() {
        let Some(series) = series else { continue };
        for &(year, days) in series {
            let row = years.entry(year).or_insert(ExtremeYear {
                year,
                heatwave_days: None,
                rainfall_days: None,
                storm_days: None,
            });
            let days = Some(days as u32);
            match slot {
                0 => row.heatwave_days = days,
                1 => row.rainfall_days = days,
                _ => row.storm_days = days,
            }
        }
    }
    Ok(years.into_values().collect())
}

// ============================================================================
// Multi-series pages (crops, threatened species)
// ============================================================================

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub series: YearlySeries,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MultiSeriesReport {
    pub title: String,
    pub unit: String,
    pub series: Vec<NamedSeries>,
    /// Requested names that were not found
    pub missing: Vec<String>,
}

fn collect_series(
    names: &[String],
    lookup: impl Fn(&str) -> Result<YearlySeries, DataError>,
) -> (Vec<NamedSeries>, Vec<String>) {
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for name in names {
        match lookup(name.as_str()) {
            Ok(series) => found.push(NamedSeries {
                name: name.clone(),
                series,
            }),
            Err(e) => {
                log::warn!("{}", e);
                missing.push(name.clone());
            }
        }
    }
    (found, missing)
}

/// Production per year for the selected crops (every crop when `crops` is empty).
pub fn crop_trends(agriculture: &AgricultureTable, crops: &[String]) -> MultiSeriesReport {
    let names = if crops.is_empty() {
        agriculture.crops().to_vec()
    } else {
        crops.to_vec()
    };
    let (series, missing) = collect_series(&names, |crop| agriculture.series(crop));
    MultiSeriesReport {
        title: "Agricultural production".to_string(),
        unit: "'000 metric tons".to_string(),
        series,
        missing,
    }
}

/// Threatened species counts per year for the selected groups (all when empty).
pub fn threatened_trend(biodiversity: &BiodiversityTable, species: &[String]) -> MultiSeriesReport {
    let names = if species.is_empty() {
        biodiversity.species()
    } else {
        species.to_vec()
    };
    let (series, missing) = collect_series(&names, |name| biodiversity.series(name));
    MultiSeriesReport {
        title: "Threatened species".to_string(),
        unit: "species".to_string(),
        series,
        missing,
    }
}

// ============================================================================
// Glacier retreat and landcover change
// ============================================================================

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GlacierRetreatReport {
    pub areas: YearlySeries,
    pub largest: Option<(i32, f64)>,
    pub smallest: Option<(i32, f64)>,
    /// Area of the last survey minus the first, km²
    pub net_change_km2: Option<f64>,
}

pub fn glacier_retreat(glacier: &GlacierInventory, survey_years: &[i32]) -> GlacierRetreatReport {
    let areas = glacier.area_by_year(survey_years);
    let (largest, smallest) = match areas.extremes() {
        Some((max, min)) => (Some(max), Some(min)),
        None => (None, None),
    };
    let net_change_km2 = match (areas.points().first(), areas.points().last()) {
        (Some(&(_, first)), Some(&(_, last))) if areas.len() > 1 => Some(last - first),
        _ => None,
    };
    GlacierRetreatReport {
        areas,
        largest,
        smallest,
        net_change_km2,
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LandcoverReport {
    pub width: usize,
    pub height: usize,
    pub scale_factor: usize,
    pub summary: ChangeSummary,
    pub change: LandcoverGrid,
}

/// Downsample both rasters by `scale_factor` and compare them pixel by pixel.
pub fn landcover_change(
    before: &LandcoverGrid,
    after: &LandcoverGrid,
    scale_factor: usize,
) -> AnalysisResult<LandcoverReport> {
    let change = LandcoverGrid::change_map(
        &before.downsample_nearest(scale_factor),
        &after.downsample_nearest(scale_factor),
    )?;
    Ok(LandcoverReport {
        width: change.width(),
        height: change.height(),
        scale_factor,
        summary: change.change_summary(),
        change,
    })
}
