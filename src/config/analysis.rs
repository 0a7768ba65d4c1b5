//! Analysis and computation configuration

/// Bounds for a forecast-horizon slider
pub struct HorizonConfig {
    pub min_year: i32,
    pub max_year: i32,
    pub default_year: i32,
}

impl HorizonConfig {
    pub fn contains(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }
}

/// Settings for the linear trend forecaster
pub struct ForecastSettings {
    // OLS needs two distinct years to pin down a line
    pub min_distinct_years: usize,
    pub climate_horizon: HorizonConfig,
    pub crop_horizon: HorizonConfig,
}

/// Settings for the paired-series correlator
pub struct CorrelationSettings {
    pub min_paired_points: usize,
    // |r| at or above this is reported as a strong relationship
    pub strong_threshold: f64,
    pub moderate_threshold: f64,
}

/// Glacier survey settings
pub struct GlacierSettings {
    // Decadal outline inventory years
    pub survey_years: &'static [i32],
}

/// Landcover comparison settings
pub struct LandcoverSettings {
    // Full-resolution rasters are too large to diff; take every Nth pixel
    pub scale_factor: usize,
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    pub forecast: ForecastSettings,
    pub correlation: CorrelationSettings,
    pub glacier: GlacierSettings,
    pub landcover: LandcoverSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    forecast: ForecastSettings {
        min_distinct_years: 2,
        climate_horizon: HorizonConfig {
            min_year: 2030,
            max_year: 2050,
            default_year: 2035,
        },
        crop_horizon: HorizonConfig {
            min_year: 2025,
            max_year: 2040,
            default_year: 2035,
        },
    },

    correlation: CorrelationSettings {
        min_paired_points: 2,
        strong_threshold: 0.7,
        moderate_threshold: 0.4,
    },

    glacier: GlacierSettings {
        survey_years: &[1980, 1990, 2000, 2010],
    },

    landcover: LandcoverSettings { scale_factor: 10 },
};
