//! HTTP backend for [`rates_core::RatesApi`].

pub mod client;
pub mod wire;

pub use client::HttpRatesApi;
