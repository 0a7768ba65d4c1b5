//! Thresholds that turn a daily observation into an "extreme" day.
//! Comparisons are strict (a day at exactly 40 °C is not a heatwave day).

pub struct ExtremeThresholds {
    /// Daily 2m temperature, °C
    pub heatwave_temp_c: f64,
    /// Daily precipitation, mm
    pub rainfall_mm: f64,
    /// Daily wind speed, km/h
    pub storm_wind_kmh: f64,
}

pub const EXTREMES: ExtremeThresholds = ExtremeThresholds {
    heatwave_temp_c: 40.0,
    rainfall_mm: 100.0,
    storm_wind_kmh: 50.0,
};
