use serde::{Deserialize, Serialize};

/// How to format the numeric value on the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money { currency: String },
    Number { decimals: u8 },
    Percent { decimals: u8 },
    Integer,
}

/// Visual status of the indicator (drives colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IndicatorStatus {
    Good,
    Bad,
    #[default]
    Neutral,
    Warning,
}

impl IndicatorStatus {
    /// Статус по доле "плохих" элементов (например, отменённых поездок)
    pub fn from_ratio(bad: usize, total: usize, warn_at: f64, bad_at: f64) -> Self {
        if total == 0 {
            return IndicatorStatus::Neutral;
        }
        let ratio = bad as f64 / total as f64;
        if ratio >= bad_at {
            IndicatorStatus::Bad
        } else if ratio >= warn_at {
            IndicatorStatus::Warning
        } else {
            IndicatorStatus::Good
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ratio() {
        assert_eq!(IndicatorStatus::from_ratio(0, 0, 0.1, 0.3), IndicatorStatus::Neutral);
        assert_eq!(IndicatorStatus::from_ratio(1, 20, 0.1, 0.3), IndicatorStatus::Good);
        assert_eq!(IndicatorStatus::from_ratio(3, 20, 0.1, 0.3), IndicatorStatus::Warning);
        assert_eq!(IndicatorStatus::from_ratio(8, 20, 0.1, 0.3), IndicatorStatus::Bad);
    }
}
