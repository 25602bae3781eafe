use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use rates_core::{
    ApiConfig, ApiError, FilingStatus, HistoryMetric, HistoryPoint, RatesApi, TaxCalculation,
    TaxInput,
};

use crate::wire::{WireHistoryPoint, into_history};

/// [`RatesApi`] over HTTP.
///
/// ```rust,no_run
/// use rates_core::ApiConfig;
/// use rates_http::HttpRatesApi;
///
/// let api = HttpRatesApi::new(ApiConfig::new("http://localhost:8080/api")).unwrap();
/// ```
pub struct HttpRatesApi {
    config: ApiConfig,
    client: Client,
}

impl HttpRatesApi {
    /// Validate `config` and build a client with its timeout applied to
    /// every request.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;
        Ok(Self { config, client })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "backend returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Transport(e.to_string())
    }
}

#[async_trait]
impl RatesApi for HttpRatesApi {
    async fn fetch_available_years(&self) -> Result<Vec<i32>, ApiError> {
        let url = self.config.endpoint("/tax/years");
        debug!(%url, "fetching available years");
        self.send_json(self.client.get(&url)).await
    }

    async fn fetch_history(
        &self,
        status: FilingStatus,
        metric: HistoryMetric,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<HistoryPoint>, ApiError> {
        let url = self.config.endpoint("/tax/history");
        debug!(%url, %status, metric = metric.as_str(), start_year, end_year, "fetching history");
        let request = self.client.get(&url).query(&[
            ("status", status.as_str().to_string()),
            ("metric", metric.as_str().to_string()),
            ("startYear", start_year.to_string()),
            ("endYear", end_year.to_string()),
        ]);
        let rows: Vec<WireHistoryPoint> = self.send_json(request).await?;
        into_history(rows)
    }

    async fn fetch_calculation(&self, input: &TaxInput) -> Result<TaxCalculation, ApiError> {
        let url = self.config.endpoint("/tax/breakdown");
        debug!(%url, year = input.year, status = %input.status, "requesting breakdown");
        self.send_json(self.client.post(&url).json(input)).await
    }
}
