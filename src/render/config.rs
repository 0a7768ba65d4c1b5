//! User-facing wording for reports and warnings

pub struct RenderText {
    pub not_enough_for_trend: &'static str,
    pub not_enough_for_correlation: &'static str,
    pub constant_series: &'static str,
    pub horizon_before_data: &'static str,
    pub repeated_year: &'static str,
    pub landcover_shape_mismatch: &'static str,
    pub unsupported_crop_variable: &'static str,
    pub no_glacier_overlap: &'static str,
    pub no_rows: &'static str,
    pub missing_value: &'static str,
    pub warning_prefix: &'static str,
}

pub const RENDER_TEXT: RenderText = RenderText {
    not_enough_for_trend: "Not enough data points to fit a trend.",
    not_enough_for_correlation: "Not enough data points to compute correlation.",
    constant_series: "One of the series does not vary, so correlation cannot be computed.",
    horizon_before_data: "The forecast year must not come before the first observed year.",
    repeated_year: "The yearly data repeats a year, so it cannot be charted.",
    landcover_shape_mismatch: "The two landcover maps have different sizes and cannot be compared.",
    unsupported_crop_variable: "Only temperature and precipitation can be correlated with crop production.",
    no_glacier_overlap: "No overlapping years between glacier surveys and climate records.",
    no_rows: "No data available.",
    missing_value: "-",
    warning_prefix: "Warning",
};
