use serde::{Deserialize, Serialize};

use crate::utils::maths_utils::{get_max, mean};

/// How a group of same-year observations collapses into one yearly value.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Debug,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::EnumIter,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Reducer {
    #[default]
    Mean,
    Sum,
    Max,
}

impl Reducer {
    /// Reduce a non-empty group of values.
    pub fn apply(&self, values: &[f64]) -> f64 {
        debug_assert!(!values.is_empty(), "reducer applied to an empty group");
        match self {
            Reducer::Mean => mean(values),
            Reducer::Sum => values.iter().sum(),
            Reducer::Max => get_max(values),
        }
    }
}
