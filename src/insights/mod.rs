// Dashboard insights: each page's computation as a plain function over loaded tables
pub mod correlations;
pub mod forecasts;
pub mod trends;

// Re-export commonly used items
pub use correlations::{
    ClimateCropCorrelation, CropCorrelation, ExtremesSummary, GlacierWeatherReport, GlacierWeatherRow,
    PairCorrelation, climate_agriculture_correlation, correlate_series, crop_pairing_reducer,
    glacier_weather, rank_crop_correlations, summarize_extremes,
};
pub use forecasts::{ForecastReport, climate_prediction, crop_forecast, series_forecast};
pub use trends::{
    ExtremeYear, GlacierRetreatReport, LandcoverReport, MultiSeriesReport, NamedSeries, YearlyTable,
    crop_trends, extreme_event_trend, glacier_retreat, landcover_change, precipitation_totals,
    temperature_trend, threatened_trend,
};
