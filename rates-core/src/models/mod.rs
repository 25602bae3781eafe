mod filing_status;
mod history;
mod tax_bracket;
mod tax_calculation;

pub use filing_status::{FilingStatus, UnknownFilingStatus};
pub use history::{HistoryMetric, HistoryPoint};
pub use tax_bracket::TaxBracket;
pub use tax_calculation::{TaxCalculation, TaxInput};
