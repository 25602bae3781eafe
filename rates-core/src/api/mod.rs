pub mod client;
pub mod config;

pub use client::{ApiError, RatesApi};
pub use config::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
