use serde::{Deserialize, Serialize};

/// Series the history endpoint can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryMetric {
    TopRate,
    BracketCount,
    AverageRate,
    MinRate,
}

impl HistoryMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopRate => "TOP_RATE",
            Self::BracketCount => "BRACKET_COUNT",
            Self::AverageRate => "AVERAGE_RATE",
            Self::MinRate => "MIN_RATE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TOP_RATE" => Some(Self::TopRate),
            "BRACKET_COUNT" => Some(Self::BracketCount),
            "AVERAGE_RATE" => Some(Self::AverageRate),
            "MIN_RATE" => Some(Self::MinRate),
            _ => None,
        }
    }

    /// Whether values of this metric are percentages.
    pub fn is_rate(&self) -> bool {
        !matches!(self, Self::BracketCount)
    }
}

/// One sample of a metric for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub year: i32,
    pub value: f64,
}

impl HistoryPoint {
    pub fn new(
        year: i32,
        value: f64,
    ) -> Self {
        Self { year, value }
    }
}
