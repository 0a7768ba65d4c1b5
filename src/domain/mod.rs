// Domain types and value objects
pub mod climate_variable;
pub mod reducer;
pub mod time_point;
pub mod yearly_series;

// Re-export commonly used types
pub use climate_variable::ClimateVariable;
pub use reducer::Reducer;
pub use time_point::TimePoint;
pub use yearly_series::YearlySeries;
