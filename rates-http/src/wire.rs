//! Response shapes as the backend sends them, and their conversion into
//! `rates_core` models.

use std::sync::LazyLock;

use rates_core::{ApiError, HistoryPoint};
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

/// A number, optionally signed, with optional thousands separators,
/// optionally followed by a percent sign.
static NUMERIC_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?[\d,]*\.?\d+)\s*%?\s*$").expect("numeric text pattern is valid")
});

/// A history value: either a JSON number or display text such as `"37%"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireHistoryPoint {
    pub year: i32,
    pub value: WireValue,
}

impl TryFrom<WireHistoryPoint> for HistoryPoint {
    type Error = ApiError;

    fn try_from(row: WireHistoryPoint) -> Result<Self, Self::Error> {
        let value = match row.value {
            WireValue::Number(n) => n,
            WireValue::Text(text) => parse_numeric_text(&text).ok_or_else(|| {
                ApiError::Decode(format!(
                    "history value '{}' for year {} is not numeric",
                    text, row.year
                ))
            })?,
        };
        Ok(HistoryPoint::new(row.year, value))
    }
}

/// Converts a fetched series, producing a new vector.
pub fn into_history(rows: Vec<WireHistoryPoint>) -> Result<Vec<HistoryPoint>, ApiError> {
    rows.into_iter().map(HistoryPoint::try_from).collect()
}

/// Parses display text like `"37%"`, `" 39.6 % "` or `"1,234"` into a plain
/// number. Returns `None` for anything else.
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let caps = NUMERIC_TEXT.captures(text)?;
    let digits = caps.get(1)?.as_str().replace(',', "");
    digits.parse::<Decimal>().ok()?.to_f64()
}
