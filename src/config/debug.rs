//! Debugging feature flags.
//!
//! Toggle individual diagnostics here. Per-value tracing is compiled out of
//! release builds regardless of these settings.

pub struct DebugFlags {
    /// Emit per-year group sizes when aggregating
    pub print_aggregation: bool,
    /// Emit slope / intercept / r² for every fitted trend
    pub print_trend_fit: bool,
    /// Emit the joined years behind every correlation
    pub print_correlation_pairs: bool,
    /// Emit row counts dropped or filled while cleaning CSV exports
    pub print_cleaning: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_aggregation: false,
    print_trend_fit: false,
    print_correlation_pairs: false,
    print_cleaning: true,
};
