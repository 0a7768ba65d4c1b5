use serde::{Deserialize, Serialize};

/// Variables carried by the daily climate export.
///
/// The export has been seen with different header spellings for the same quantity
/// ("Precipitation" vs "Precip", "WindSpeed" vs "WindSpeed_10m"), so each variable lists
/// every accepted header and the loader takes the first one present.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::EnumIter,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ClimateVariable {
    Temperature,
    MaxTemperature,
    Precipitation,
    WindSpeed,
}

impl ClimateVariable {
    pub fn column_aliases(&self) -> &'static [&'static str] {
        match self {
            ClimateVariable::Temperature => &["Temp_2m"],
            ClimateVariable::MaxTemperature => &["MaxTemp_2m"],
            ClimateVariable::Precipitation => &["Precipitation", "Precip"],
            ClimateVariable::WindSpeed => &["WindSpeed", "WindSpeed_10m", "Wind"],
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ClimateVariable::Temperature | ClimateVariable::MaxTemperature => "°C",
            ClimateVariable::Precipitation => "mm",
            ClimateVariable::WindSpeed => "km/h",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClimateVariable::Temperature => "Temperature (°C)",
            ClimateVariable::MaxTemperature => "Max Temperature (°C)",
            ClimateVariable::Precipitation => "Precipitation (mm)",
            ClimateVariable::WindSpeed => "Wind Speed (km/h)",
        }
    }
}
