use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::correlate::pearson;
use crate::analysis::{aggregate, annual_maxima, merge_on_year};
use crate::data::{AgricultureTable, ClimateTable, GlacierInventory};
use crate::domain::{ClimateVariable, Reducer, YearlySeries};
use crate::error::{AnalysisError, AnalysisResult, InsightResult};
use crate::models::{CorrelationResult, CorrelationStrength};

/// Correlation of two arbitrary yearly series, labelled for display.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PairCorrelation {
    pub left: String,
    pub right: String,
    pub rows: Vec<(i32, f64, f64)>,
    pub result: CorrelationResult,
    pub strength: Option<CorrelationStrength>,
}

pub fn correlate_series(
    left: (&str, &YearlySeries),
    right: (&str, &YearlySeries),
    with_p_value: bool,
) -> PairCorrelation {
    let rows = merge_on_year(left.1, right.1);
    let result = pearson(&rows, with_p_value);
    PairCorrelation {
        left: left.0.to_string(),
        right: right.0.to_string(),
        rows,
        result,
        strength: result.strength(),
    }
}

// ============================================================================
// Climate vs agriculture
// ============================================================================

/// How a climate variable is collapsed to one value per year before it is paired with
/// crop production. Only temperature and precipitation have an agreed reduction.
pub fn crop_pairing_reducer(variable: ClimateVariable) -> AnalysisResult<Reducer> {
    match variable {
        ClimateVariable::Temperature => Ok(Reducer::Mean),
        ClimateVariable::Precipitation => Ok(Reducer::Sum),
        other => Err(AnalysisError::UnsupportedVariable {
            variable: other.to_string(),
        }),
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClimateCropCorrelation {
    pub variable: ClimateVariable,
    pub crop: String,
    pub reducer: Reducer,
    /// `(year, climate value, crop production)` for years present in both
    pub rows: Vec<(i32, f64, f64)>,
    pub result: CorrelationResult,
    pub strength: Option<CorrelationStrength>,
}

pub fn climate_agriculture_correlation(
    climate: &ClimateTable,
    agriculture: &AgricultureTable,
    variable: ClimateVariable,
    crop: &str,
) -> InsightResult<ClimateCropCorrelation> {
    let reducer = crop_pairing_reducer(variable)?;
    let climate_yearly = aggregate(&climate.points(variable)?, reducer);
    let crop_yearly = agriculture.series(crop)?;

    let rows = merge_on_year(&climate_yearly, &crop_yearly);
    let result = pearson(&rows, true);

    Ok(ClimateCropCorrelation {
        variable,
        crop: crop.to_string(),
        reducer,
        rows,
        result,
        strength: result.strength(),
    })
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CropCorrelation {
    pub crop: String,
    pub result: CorrelationResult,
}

/// Correlation of one climate variable against every crop, strongest |r| first.
/// Crops whose correlation is undefined are listed last, in table order.
pub fn rank_crop_correlations(
    climate: &ClimateTable,
    agriculture: &AgricultureTable,
    variable: ClimateVariable,
) -> InsightResult<Vec<CropCorrelation>> {
    let reducer = crop_pairing_reducer(variable)?;
    let climate_yearly = aggregate(&climate.points(variable)?, reducer);

    let mut ranked = agriculture
        .crops()
        .par_iter()
        .map(|crop| -> InsightResult<CropCorrelation> {
            let crop_yearly = agriculture.series(crop)?;
            Ok(CropCorrelation {
                crop: crop.clone(),
                result: pearson(&merge_on_year(&climate_yearly, &crop_yearly), true),
            })
        })
        .collect::<InsightResult<Vec<_>>>()?;

    // Stable sort keeps table order among equal keys
    ranked.sort_by(|a, b| match (a.result.r(), b.result.r()) {
        (Some(ra), Some(rb)) => rb.abs().total_cmp(&ra.abs()),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    Ok(ranked)
}

// ============================================================================
// Glacier area vs weather extremes
// ============================================================================

/// Yearly weather extremes over the glacier survey years.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExtremesSummary {
    pub max_temperature: YearlySeries,
    pub max_precipitation: YearlySeries,
}

pub fn summarize_extremes(climate: &ClimateTable, survey_years: &[i32]) -> InsightResult<ExtremesSummary> {
    Ok(ExtremesSummary {
        max_temperature: annual_maxima(&climate.points(ClimateVariable::MaxTemperature)?, survey_years),
        max_precipitation: annual_maxima(&climate.points(ClimateVariable::Precipitation)?, survey_years),
    })
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct GlacierWeatherRow {
    pub year: i32,
    pub area_km2: f64,
    pub max_temperature: f64,
    pub max_precipitation: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GlacierWeatherReport {
    pub rows: Vec<GlacierWeatherRow>,
    pub temperature_vs_area: CorrelationResult,
    pub precipitation_vs_area: CorrelationResult,
}

impl GlacierWeatherReport {
    /// No survey year has both glacier and weather data.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Glacier area joined with the weather extremes of the same survey year.
pub fn glacier_weather(
    glacier: &GlacierInventory,
    climate: &ClimateTable,
    survey_years: &[i32],
) -> InsightResult<GlacierWeatherReport> {
    let area = glacier.area_by_year(survey_years);
    let extremes = summarize_extremes(climate, survey_years)?;

    let rows: Vec<GlacierWeatherRow> = area
        .iter()
        .filter_map(|&(year, area_km2)| {
            Some(GlacierWeatherRow {
                year,
                area_km2,
                max_temperature: extremes.max_temperature.value_at(year)?,
                max_precipitation: extremes.max_precipitation.value_at(year)?,
            })
        })
        .collect();

    if rows.is_empty() {
        log::warn!("No overlapping years between glacier surveys and climate records");
    }

    let temperature_vs_area = weather_vs_area(&rows, |row| row.max_temperature);
    let precipitation_vs_area = weather_vs_area(&rows, |row| row.max_precipitation);

    Ok(GlacierWeatherReport {
        rows,
        temperature_vs_area,
        precipitation_vs_area,
    })
}

fn weather_vs_area(rows: &[GlacierWeatherRow], weather: impl Fn(&GlacierWeatherRow) -> f64) -> CorrelationResult {
    let paired: Vec<(i32, f64, f64)> = rows
        .iter()
        .map(|row| (row.year, weather(row), row.area_km2))
        .collect();
    pearson(&paired, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InsightError;
    use crate::models::UndefinedReason;
    use approx::assert_abs_diff_eq;

    const CLIMATE: &str = "\
Date,Temp_2m,MaxTemp_2m,Precip,WindSpeed_10m
2000-01-01,10.0,15.0,2.0,5.0
2000-07-01,20.0,30.0,8.0,7.0
2001-01-01,12.0,16.0,1.0,6.0
2001-07-01,22.0,31.0,4.0,8.0
2002-01-01,14.0,18.0,3.0,4.0
2002-07-01,24.0,33.0,1.0,9.0
";

    const AGRI: &str = "\
Crop,2000/01,2001/02,2002/03,2003/04
Paddy,100,110,120,130
Wheat,50,45,40,35
Barley,7,7,7,7
";

    fn tables() -> (ClimateTable, AgricultureTable) {
        (
            ClimateTable::from_reader(CLIMATE.as_bytes()).unwrap(),
            AgricultureTable::from_reader(AGRI.as_bytes()).unwrap(),
        )
    }

    #[test]
    fn test_correlate_series_labels_and_rows() {
        let a = YearlySeries::from_pairs([(2000, 1.0), (2001, 2.0), (2002, 4.0)]).unwrap();
        let b = YearlySeries::from_pairs([(2001, 3.0), (2002, 5.0), (2003, 9.0)]).unwrap();
        let report = correlate_series(("rain", &a), ("yield", &b), false);
        assert_eq!(report.left, "rain");
        assert_eq!(report.rows, vec![(2001, 2.0, 3.0), (2002, 4.0, 5.0)]);
        assert_abs_diff_eq!(report.result.r().unwrap(), 1.0, epsilon = 1e-9);
        assert_eq!(report.result.p_value(), None);
    }

    #[test]
    fn test_temperature_uses_yearly_mean() {
        let (climate, agriculture) = tables();
        let report =
            climate_agriculture_correlation(&climate, &agriculture, ClimateVariable::Temperature, "Paddy")
                .unwrap();
        assert_eq!(report.reducer, Reducer::Mean);
        // 2003 has no climate data and is dropped from the merge
        assert_eq!(
            report.rows,
            vec![(2000, 15.0, 100.0), (2001, 17.0, 110.0), (2002, 19.0, 120.0)]
        );
        assert_abs_diff_eq!(report.result.r().unwrap(), 1.0, epsilon = 1e-9);
        assert_eq!(report.strength, Some(CorrelationStrength::Strong));
        assert!(report.result.p_value().unwrap() < 1e-6);
    }

    #[test]
    fn test_precipitation_uses_yearly_sum() {
        let (climate, agriculture) = tables();
        let report = climate_agriculture_correlation(
            &climate,
            &agriculture,
            ClimateVariable::Precipitation,
            "Paddy",
        )
        .unwrap();
        assert_eq!(report.reducer, Reducer::Sum);
        let climate_side: Vec<f64> = report.rows.iter().map(|&(_, x, _)| x).collect();
        assert_eq!(climate_side, vec![10.0, 5.0, 4.0]);
    }

    #[test]
    fn test_other_variables_are_rejected() {
        let (climate, agriculture) = tables();
        let err =
            climate_agriculture_correlation(&climate, &agriculture, ClimateVariable::WindSpeed, "Paddy")
                .unwrap_err();
        assert!(matches!(
            err,
            InsightError::Analysis(AnalysisError::UnsupportedVariable { .. })
        ));
    }

    #[test]
    fn test_rank_crop_correlations() {
        let (climate, agriculture) = tables();
        let ranked = rank_crop_correlations(&climate, &agriculture, ClimateVariable::Temperature).unwrap();
        let order: Vec<&str> = ranked.iter().map(|c| c.crop.as_str()).collect();
        // Paddy (+1) and Wheat (-1) tie on |r|; Barley is constant
        assert_eq!(order, vec!["Paddy", "Wheat", "Barley"]);
        assert_eq!(
            ranked[2].result,
            CorrelationResult::Undefined(UndefinedReason::ZeroVariance)
        );
    }

    #[test]
    fn test_glacier_weather_merge() {
        let climate = ClimateTable::from_reader(
            "Date,MaxTemp_2m,Precip\n1980-05-01,30,80\n1980-06-01,32,90\n1990-05-01,33,75\n2000-05-01,35,60\n"
                .as_bytes(),
        )
        .unwrap();
        let glacier = GlacierInventory::from_polygons(vec![
            (1980, 600.0),
            (1990, 550.0),
            (2000, 500.0),
            (2010, 450.0),
        ]);

        let report = glacier_weather(&glacier, &climate, &[1980, 1990, 2000, 2010]).unwrap();
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].max_temperature, 32.0);
        assert_eq!(report.rows[0].max_precipitation, 90.0);
        assert!(report.temperature_vs_area.r().unwrap() < -0.9);
        assert_abs_diff_eq!(report.precipitation_vs_area.r().unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_glacier_weather_without_overlap() {
        let climate =
            ClimateTable::from_reader("Date,MaxTemp_2m,Precip\n1990-01-01,20,5\n".as_bytes()).unwrap();
        let glacier = GlacierInventory::from_polygons(vec![(1980, 600.0), (2010, 450.0)]);
        let report = glacier_weather(&glacier, &climate, &[1980, 1990, 2000, 2010]).unwrap();
        assert!(report.is_empty());
        assert_eq!(
            report.temperature_vs_area,
            CorrelationResult::Undefined(UndefinedReason::TooFewPairs { paired: 0 })
        );
    }
}
