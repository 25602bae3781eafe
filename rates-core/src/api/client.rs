use async_trait::async_trait;
use thiserror::Error;

use crate::models::{FilingStatus, HistoryMetric, HistoryPoint, TaxCalculation, TaxInput};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Typed calls against the tax-rates backend.
///
/// Each call is one independent round trip; implementations must not retry.
#[async_trait]
pub trait RatesApi: Send + Sync {
    /// Years for which the backend has bracket data.
    async fn fetch_available_years(&self) -> Result<Vec<i32>, ApiError>;

    /// One metric over the inclusive range `start_year..=end_year`.
    async fn fetch_history(
        &self,
        status: FilingStatus,
        metric: HistoryMetric,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<HistoryPoint>, ApiError>;

    async fn fetch_calculation(&self, input: &TaxInput) -> Result<TaxCalculation, ApiError>;
}
