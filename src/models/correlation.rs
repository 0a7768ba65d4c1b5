use serde::Serialize;
use std::fmt;

use crate::config::ANALYSIS;

/// Why a correlation could not be computed.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndefinedReason {
    /// Fewer than two years present in both series
    TooFewPairs { paired: usize },
    /// One of the paired vectors is constant
    ZeroVariance,
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UndefinedReason::TooFewPairs { paired } => {
                write!(f, "only {} overlapping year(s)", paired)
            }
            UndefinedReason::ZeroVariance => write!(f, "a series is constant over the overlap"),
        }
    }
}

/// Pearson correlation of two year-matched series, or the reason it is undefined.
/// "Undefined" is an expected outcome for sparse overlaps, never an error.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub enum CorrelationResult {
    Defined {
        r: f64,
        paired: usize,
        /// Two-sided p-value for r = 0, only when it was requested and n > 2
        p_value: Option<f64>,
    },
    Undefined(UndefinedReason),
}

impl CorrelationResult {
    pub fn r(&self) -> Option<f64> {
        match self {
            CorrelationResult::Defined { r, .. } => Some(*r),
            CorrelationResult::Undefined(_) => None,
        }
    }

    pub fn p_value(&self) -> Option<f64> {
        match self {
            CorrelationResult::Defined { p_value, .. } => *p_value,
            CorrelationResult::Undefined(_) => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, CorrelationResult::Defined { .. })
    }

    pub fn strength(&self) -> Option<CorrelationStrength> {
        self.r().map(CorrelationStrength::classify)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
}

impl CorrelationStrength {
    pub fn classify(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude >= ANALYSIS.correlation.strong_threshold {
            CorrelationStrength::Strong
        } else if magnitude >= ANALYSIS.correlation.moderate_threshold {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            CorrelationStrength::Strong => {
                "A strong correlation suggests that changes in the selected climate variable are closely linked to crop yield variations."
            }
            CorrelationStrength::Moderate => {
                "A moderate correlation indicates a noticeable relationship between the climate variable and crop yield."
            }
            CorrelationStrength::Weak => {
                "A weak correlation suggests other factors may play a larger role in influencing crop yield."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(CorrelationStrength::classify(0.7), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::classify(-0.85), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::classify(0.4), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::classify(-0.69), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::classify(0.39), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::classify(0.0), CorrelationStrength::Weak);
    }

    #[test]
    fn test_undefined_accessors() {
        let undefined = CorrelationResult::Undefined(UndefinedReason::TooFewPairs { paired: 1 });
        assert!(!undefined.is_defined());
        assert_eq!(undefined.r(), None);
        assert_eq!(undefined.strength(), None);
    }
}
