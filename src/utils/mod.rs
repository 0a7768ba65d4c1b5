// Small numeric and date helpers shared by the loaders and the analysis code
pub mod maths_utils;
pub mod time_utils;

pub use time_utils::{TimeUtils, fiscal_year_start, format_date, parse_date};
