use std::fmt;

use rates_core::years::{DEFAULT_START_YEAR, normalize_range};
use rates_core::{FilingStatus, TaxInput};
use rust_decimal::Decimal;

use crate::utils::format_currency;

/// Income prefilled in the calculator.
pub const DEFAULT_INCOME: i64 = 85_000;

/// Current filter selections shared by the trend charts and the calculator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filters {
    pub status: FilingStatus,
    pub start_year: i32,
    pub end_year: i32,
    pub calc_year: i32,
    pub income: Decimal,
}

impl Filters {
    /// Defaults relative to `current_year`: trends from 1924 to now, the
    /// calculator on last year's tables.
    pub fn new(current_year: i32) -> Self {
        Self {
            status: FilingStatus::default(),
            start_year: DEFAULT_START_YEAR,
            end_year: current_year,
            calc_year: current_year - 1,
            income: Decimal::from(DEFAULT_INCOME),
        }
    }

    /// The trend range with start and end in ascending order.
    pub fn trend_range(&self) -> (i32, i32) {
        let range = normalize_range(self.start_year, self.end_year);
        (*range.start(), *range.end())
    }

    pub fn to_tax_input(&self) -> TaxInput {
        TaxInput {
            year: self.calc_year,
            status: self.status,
            income: self.income,
        }
    }
}

impl fmt::Display for Filters {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let (start, end) = self.trend_range();
        writeln!(f, "Filing status:   {}", self.status.label())?;
        writeln!(f, "Trend range:     {start}–{end}")?;
        writeln!(f, "Calculator year: {}", self.calc_year)?;
        write!(f, "Income:          {}", format_currency(self.income))
    }
}

/// Filter control that receives keyboard edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusField {
    #[default]
    Status,
    StartYear,
    EndYear,
    CalcYear,
    Income,
}

impl FocusField {
    const ORDER: [FocusField; 5] = [
        FocusField::Status,
        FocusField::StartYear,
        FocusField::EndYear,
        FocusField::CalcYear,
        FocusField::Income,
    ];

    pub fn all() -> &'static [FocusField] {
        &Self::ORDER
    }

    pub fn label(&self) -> &'static str {
        match self {
            FocusField::Status => "Filing Status",
            FocusField::StartYear => "Start Year",
            FocusField::EndYear => "End Year",
            FocusField::CalcYear => "Year (Calculator)",
            FocusField::Income => "Income ($)",
        }
    }

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}
