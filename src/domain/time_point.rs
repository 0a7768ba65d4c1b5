use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single raw observation of one variable.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TimePoint {
    pub timestamp: NaiveDate,
    pub value: f64,
}

impl TimePoint {
    pub fn new(timestamp: NaiveDate, value: f64) -> Self {
        Self { timestamp, value }
    }

    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }
}
