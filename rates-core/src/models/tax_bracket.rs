use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// One row of a calculation breakdown.
///
/// Amounts arrive display-formatted from the backend and are kept as
/// strings; `range_end` is `None` for the top, unbounded bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBracket {
    pub year: i32,
    pub status: FilingStatus,
    pub range_start: String,
    pub range_end: Option<String>,
    pub tax_rate: String,
    pub tax_paid: String,
}

impl TaxBracket {
    pub fn is_unbounded(&self) -> bool {
        self.range_end.is_none()
    }
}
