use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FilingStatus, TaxBracket};

/// Request payload for a single calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    pub year: i32,
    pub status: FilingStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
}

/// Result of running the calculator for one (year, status, income).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculation {
    pub total_tax_paid: String,
    pub avg_rate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub brackets: Vec<TaxBracket>,
}
