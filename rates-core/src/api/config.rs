use std::time::Duration;

use tracing::debug;

use super::client::ApiError;

/// Base URL baked in at compile time, if the build environment provides one.
const BUILD_BASE_URL: Option<&str> = option_env!("TAX_RATES_API_BASE_URL");

/// Local development origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Client-side request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for a [`super::RatesApi`] implementation.
///
/// Built explicitly and handed to the client constructor; nothing reads
/// process-wide state after construction.
///
/// | field      | default                                   |
/// |------------|-------------------------------------------|
/// | `base_url` | `$TAX_RATES_API_BASE_URL` at build time, else [`DEFAULT_BASE_URL`] |
/// | `timeout`  | 10 seconds                                |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Prefix for every endpoint path, e.g. `http://host/api`.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: BUILD_BASE_URL.unwrap_or(DEFAULT_BASE_URL).to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(
        mut self,
        timeout: Duration,
    ) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the settings before a client is built.
    ///
    /// # Errors
    /// * [`ApiError::Configuration`] – empty or non-HTTP base URL, or a zero
    ///   timeout.
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ApiError::Configuration("base URL is empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ApiError::Configuration(format!(
                "base URL '{url}' must start with http:// or https://"
            )));
        }
        if self.timeout.is_zero() {
            return Err(ApiError::Configuration("timeout must be non-zero".to_string()));
        }
        debug!(base_url = url, timeout = ?self.timeout, "API configuration accepted");
        Ok(())
    }

    /// Join an endpoint path onto the base URL with exactly one slash.
    pub fn endpoint(
        &self,
        path: &str,
    ) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
