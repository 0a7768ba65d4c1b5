
use itertools::Itertools;

use crate::insights::{
    ClimateCropCorrelation, CropCorrelation, ExtremeYear, ForecastReport, GlacierRetreatReport,
    GlacierWeatherReport, LandcoverReport, MultiSeriesReport, PairCorrelation, YearlyTable,
};
use crate::models::{CorrelationResult, TrendLine};
use crate::render::config::RENDER_TEXT;
use crate::render::table::TextTable;
use crate::render::undefined_warning;
use crate::render::utils::{format_optional, format_p_value, format_value, heading};

/// Human-readable rendering of a report.
pub trait TextReport {
    fn to_text(&self) -> String;
}

/// `r = 0.775 (n = 5, p = 0.124)`, or the neutral warning when undefined.
pub fn correlation_line(result: &CorrelationResult) -> String {
    match result {
        CorrelationResult::Defined { r, paired, p_value } => {
            let mut line = format!("r = {:.3} (n = {}", r, paired);
            if let Some(p) = p_value {
                line.push_str(&format!(", p = {}", format_p_value(*p)));
            }
            line.push(')');
            if let Some(strength) = result.strength() {
                line.push_str(&format!(", {}", strength.to_string().to_lowercase()));
            }
            line
        }
        CorrelationResult::Undefined(reason) => undefined_warning(reason).to_string(),
    }
}

fn trend_line(trend: &TrendLine, unit: &str) -> String {
    let per_year = if unit.is_empty() {
        "per year".to_string()
    } else {
        format!("{} per year", unit)
    };
    format!("Trend: {:+.4} {} (r² = {:.3})", trend.slope, per_year, trend.r_squared)
}

fn value_header(label: &str, unit: &str) -> String {
    if unit.is_empty() {
        label.to_string()
    } else {
        format!("{} ({})", label, unit)
    }
}

fn optional_count(value: Option<u32>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| RENDER_TEXT.missing_value.to_string())
}

impl TextReport for YearlyTable {
    fn to_text(&self) -> String {
        let mut out = heading(&self.title) + "\n";
        if self.series.is_empty() {
            out.push_str(RENDER_TEXT.no_rows);
            return out;
        }

        let mut table = TextTable::new(["Year".to_string(), value_header("Value", &self.unit)]);
        for &(year, value) in &self.series {
            table.push_row([year.to_string(), format_value(value)]);
        }
        out.push_str(&table.render());

        out.push('\n');
        match &self.trend {
            Some(trend) => out.push_str(&trend_line(trend, &self.unit)),
            None => out.push_str(RENDER_TEXT.not_enough_for_trend),
        }
        out
    }
}

impl TextReport for ForecastReport {
    fn to_text(&self) -> String {
        let forecast = &self.forecast;
        let mut out = heading(format!("{} forecast", self.subject)) + "\n";

        let mut table = TextTable::new(["Year", "Observed", "Predicted"]);
        for &(year, predicted) in &forecast.predicted {
            table.push_row([
                year.to_string(),
                format_optional(forecast.observed.value_at(year)),
                format_value(predicted),
            ]);
        }
        out.push_str(&table.render());

        out.push_str(&format!(
            "\n{}\nPredicted value in {}: {} {}",
            trend_line(&forecast.trend, &self.unit),
            forecast.horizon_year,
            format_value(self.horizon_value),
            self.unit
        ));
        out.trim_end().to_string()
    }
}

fn merged_rows_table(left: &str, right: &str, rows: &[(i32, f64, f64)]) -> TextTable {
    let mut table = TextTable::new(["Year", left, right]);
    for &(year, x, y) in rows {
        table.push_row([year.to_string(), format_value(x), format_value(y)]);
    }
    table
}

impl TextReport for PairCorrelation {
    fn to_text(&self) -> String {
        let mut out = heading(format!("{} vs {}", self.left, self.right)) + "\n";
        let table = merged_rows_table(&self.left, &self.right, &self.rows);
        if !table.is_empty() {
            out.push_str(&table.render());
            out.push('\n');
        }
        out.push_str(&correlation_line(&self.result));
        out
    }
}

impl TextReport for ClimateCropCorrelation {
    fn to_text(&self) -> String {
        let left = format!("{} ({})", self.variable.label(), self.reducer);
        let mut out = heading(format!("{} vs {}", self.variable.label(), self.crop)) + "\n";
        let table = merged_rows_table(&left, &self.crop, &self.rows);
        if !table.is_empty() {
            out.push_str(&table.render());
            out.push('\n');
        }
        out.push_str(&correlation_line(&self.result));
        if let Some(strength) = self.strength {
            out.push_str(&format!("\n{}", strength.summary()));
        }
        out
    }
}

impl TextReport for Vec<CropCorrelation> {
    fn to_text(&self) -> String {
        let mut table = TextTable::new(["Crop", "r", "p", "Strength"]);
        for entry in self {
            match &entry.result {
                CorrelationResult::Defined { r, p_value, .. } => table.push_row([
                    entry.crop.clone(),
                    format!("{:.3}", r),
                    p_value
                        .map(format_p_value)
                        .unwrap_or_else(|| RENDER_TEXT.missing_value.to_string()),
                    entry
                        .result
                        .strength()
                        .map(|s| s.to_string())
                        .unwrap_or_default(),
                ]),
                CorrelationResult::Undefined(_) => table.push_row([
                    entry.crop.clone(),
                    RENDER_TEXT.missing_value.to_string(),
                    RENDER_TEXT.missing_value.to_string(),
                    String::new(),
                ]),
            }
        }
        heading("Crop correlations") + "\n" + &table.render()
    }
}

impl TextReport for GlacierWeatherReport {
    fn to_text(&self) -> String {
        let mut out = heading("Extreme weather vs glacier area") + "\n";
        if self.is_empty() {
            out.push_str(RENDER_TEXT.no_glacier_overlap);
            return out;
        }

        let mut table = TextTable::new(["Year", "Area (km²)", "Max temp (°C)", "Max precip (mm)"]);
        for row in &self.rows {
            table.push_row([
                row.year.to_string(),
                format_value(row.area_km2),
                format_value(row.max_temperature),
                format_value(row.max_precipitation),
            ]);
        }
        out.push_str(&table.render());
        out.push_str(&format!(
            "\nMax temperature vs area: {}\nMax precipitation vs area: {}",
            correlation_line(&self.temperature_vs_area),
            correlation_line(&self.precipitation_vs_area)
        ));
        out
    }
}

impl TextReport for Vec<ExtremeYear> {
    fn to_text(&self) -> String {
        let mut table = TextTable::new(["Year", "Heatwave days", "Extreme rainfall days", "Storm days"]);
        for row in self {
            table.push_row([
                row.year.to_string(),
                optional_count(row.heatwave_days),
                optional_count(row.rainfall_days),
                optional_count(row.storm_days),
            ]);
        }
        heading("Extreme weather events per year") + "\n" + &table.render()
    }
}

impl TextReport for MultiSeriesReport {
    fn to_text(&self) -> String {
        let mut out = heading(format!("{} ({})", self.title, self.unit)) + "\n";

        let years: Vec<i32> = self
            .series
            .iter()
            .flat_map(|named| named.series.years())
            .sorted()
            .dedup()
            .collect();

        if years.is_empty() {
            out.push_str(RENDER_TEXT.no_rows);
        } else {
            let mut headers = vec!["Year".to_string()];
            headers.extend(self.series.iter().map(|named| named.name.clone()));
            let mut table = TextTable::new(headers);
            for year in years {
                let mut row = vec![year.to_string()];
                row.extend(
                    self.series
                        .iter()
                        .map(|named| format_optional(named.series.value_at(year))),
                );
                table.push_row(row);
            }
            out.push_str(&table.render());
        }

        for name in &self.missing {
            out.push_str(&format!("\n{}: '{}' not found", RENDER_TEXT.warning_prefix, name));
        }
        out
    }
}

impl TextReport for GlacierRetreatReport {
    fn to_text(&self) -> String {
        let mut out = heading("Glacier retreat") + "\n";
        if self.areas.is_empty() {
            out.push_str(RENDER_TEXT.no_rows);
            return out;
        }

        let mut table = TextTable::new(["Year", "Total area (km²)"]);
        for &(year, area) in &self.areas {
            table.push_row([year.to_string(), format_value(area)]);
        }
        out.push_str(&table.render());

        if let (Some((max_year, max)), Some((min_year, min))) = (self.largest, self.smallest) {
            out.push_str(&format!(
                "\nLargest: {} km² ({})\nSmallest: {} km² ({})",
                format_value(max),
                max_year,
                format_value(min),
                min_year
            ));
        }
        if let Some(change) = self.net_change_km2 {
            out.push_str(&format!("\nNet change: {} km²", format_value(change)));
        }
        out
    }
}

impl TextReport for LandcoverReport {
    fn to_text(&self) -> String {
        format!(
            "{}\nGrid: {} x {} (downsampled by {})\nChanged pixels: {}\nUnchanged pixels: {}\nShare changed: {:.1}%",
            heading("Landcover change"),
            self.width,
            self.height,
            self.scale_factor,
            self.summary.changed,
            self.summary.unchanged,
            self.summary.share_changed * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::YearlySeries;
    use crate::models::UndefinedReason;

    #[test]
    fn test_correlation_line() {
        let defined = CorrelationResult::Defined {
            r: 0.7746,
            paired: 5,
            p_value: Some(0.124),
        };
        assert_eq!(correlation_line(&defined), "r = 0.775 (n = 5, p = 0.124), strong");

        let undefined = CorrelationResult::Undefined(UndefinedReason::TooFewPairs { paired: 1 });
        assert_eq!(
            correlation_line(&undefined),
            "Not enough data points to compute correlation."
        );
    }

    #[test]
    fn test_yearly_table_without_trend() {
        let table = YearlyTable::new(
            "Average temperature",
            "°C",
            YearlySeries::from_pairs([(2001, 5.0)]).unwrap(),
        );
        let text = table.to_text();
        assert!(text.starts_with("AVERAGE TEMPERATURE:"));
        assert!(text.ends_with(RENDER_TEXT.not_enough_for_trend));
    }
}
