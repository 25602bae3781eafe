pub mod api;
pub mod models;
pub mod years;

pub use api::{ApiConfig, ApiError, RatesApi};
pub use models::*;
