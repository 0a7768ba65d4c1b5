// Analysis algorithms: yearly aggregation, trend forecasting, correlation
pub mod aggregate;
pub mod correlate;
pub mod extremes;
pub mod landcover;
pub mod trend_forecast;

// Re-export commonly used functions
pub use aggregate::{aggregate, aggregate_years};
pub use correlate::{correlate, correlate_with_p_value, merge_on_year};
pub use extremes::{annual_maxima, count_extreme_days};
pub use landcover::{ChangeSummary, LandcoverGrid};
pub use trend_forecast::{fit_trend, forecast};
