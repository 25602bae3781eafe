//! Effect requests and their results (Elm commands and messages).

use rates_core::{ApiError, FilingStatus, HistoryPoint, TaxCalculation, TaxInput};

/// The two series shown by the trend charts, fetched together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    pub top_rate: Vec<HistoryPoint>,
    pub bracket_count: Vec<HistoryPoint>,
}

/// Network work requested by a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Years bootstrap.
    LoadYears,
    /// Trend refresh for the given range; `generation` identifies the
    /// trigger so stale results can be dropped.
    LoadTrends {
        generation: u64,
        status: FilingStatus,
        start_year: i32,
        end_year: i32,
    },
    /// Explicit calculator run; `request` is its sequence number.
    RunCalculation { request: u64, input: TaxInput },
}

/// Outcome of a [`Command`], fed back into the state.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    YearsLoaded(Result<Vec<i32>, ApiError>),
    TrendsLoaded {
        generation: u64,
        result: Result<TrendSeries, ApiError>,
    },
    CalculationLoaded {
        request: u64,
        result: Result<TaxCalculation, ApiError>,
    },
}
