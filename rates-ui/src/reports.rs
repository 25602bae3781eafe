//! Plain-text reports printed by the headless subcommands.

use std::fmt;

use rates_core::years::{normalize_range, sort_descending};
use rates_core::{
    ApiError, FilingStatus, HistoryMetric, HistoryPoint, RatesApi, TaxCalculation, TaxInput,
};

use crate::components::bracket_rows;
use crate::utils::{format_amount_text, format_currency, format_percent, format_rate_text};

const YEARS_PER_LINE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearsReport {
    /// Newest first.
    pub years: Vec<i32>,
}

impl YearsReport {
    pub async fn load(api: &dyn RatesApi) -> Result<Self, ApiError> {
        let years = sort_descending(api.fetch_available_years().await?);
        Ok(Self { years })
    }
}

impl fmt::Display for YearsReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.years.is_empty() {
            return write!(f, "No years available.");
        }
        write!(f, "Available years ({}):", self.years.len())?;
        for chunk in self.years.chunks(YEARS_PER_LINE) {
            let line: Vec<String> = chunk.iter().map(i32::to_string).collect();
            write!(f, "\n  {}", line.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryReport {
    pub status: FilingStatus,
    pub metric: HistoryMetric,
    pub start_year: i32,
    pub end_year: i32,
    pub points: Vec<HistoryPoint>,
}

impl HistoryReport {
    /// Fetch one series. A reversed range is swapped first.
    pub async fn load(
        api: &dyn RatesApi,
        status: FilingStatus,
        metric: HistoryMetric,
        start_year: i32,
        end_year: i32,
    ) -> Result<Self, ApiError> {
        let range = normalize_range(start_year, end_year);
        let (start_year, end_year) = (*range.start(), *range.end());
        let points = api
            .fetch_history(status, metric, start_year, end_year)
            .await?;
        Ok(Self {
            status,
            metric,
            start_year,
            end_year,
            points,
        })
    }

    fn format_value(
        &self,
        value: f64,
    ) -> String {
        if self.metric.is_rate() {
            format_percent(value)
        } else {
            value.to_string()
        }
    }
}

impl fmt::Display for HistoryReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{} for {}, {}–{}",
            self.metric.as_str(),
            self.status.label(),
            self.start_year,
            self.end_year
        )?;
        if self.points.is_empty() {
            return write!(f, "\n  (no data)");
        }
        for p in &self.points {
            write!(f, "\n  {:>4}  {}", p.year, self.format_value(p.value))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationReport {
    pub input: TaxInput,
    pub calculation: TaxCalculation,
}

impl CalculationReport {
    pub async fn load(
        api: &dyn RatesApi,
        input: TaxInput,
    ) -> Result<Self, ApiError> {
        let calculation = api.fetch_calculation(&input).await?;
        Ok(Self { input, calculation })
    }
}

impl fmt::Display for CalculationReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let calc = &self.calculation;
        writeln!(f, "Year:            {}", self.input.year)?;
        writeln!(f, "Filing status:   {}", self.input.status.label())?;
        writeln!(f, "Income:          {}", format_currency(self.input.income))?;
        writeln!(f, "Total tax paid:  {}", format_amount_text(&calc.total_tax_paid))?;
        write!(f, "Average rate:    {}", format_rate_text(&calc.avg_rate))?;
        if let Some(message) = &calc.message {
            write!(f, "\n{message}")?;
        }

        if calc.brackets.is_empty() {
            return Ok(());
        }
        write!(
            f,
            "\n\n{:>14}  {:>14}  {:>8}  {:>14}",
            "Lower", "Upper", "Rate", "Tax Paid"
        )?;
        for row in bracket_rows(&calc.brackets) {
            write!(
                f,
                "\n{:>14}  {:>14}  {:>8}  {:>14}",
                row.lower, row.upper, row.rate, row.tax_paid
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rates_core::TaxBracket;
    use rust_decimal_macros::dec;

    use super::*;

    /// Canned responses; records the last history query.
    #[derive(Default)]
    struct StubApi {
        years: Vec<i32>,
        points: Vec<HistoryPoint>,
        last_range: Mutex<Option<(i32, i32)>>,
    }

    #[async_trait]
    impl RatesApi for StubApi {
        async fn fetch_available_years(&self) -> Result<Vec<i32>, ApiError> {
            Ok(self.years.clone())
        }

        async fn fetch_history(
            &self,
            _status: FilingStatus,
            _metric: HistoryMetric,
            start_year: i32,
            end_year: i32,
        ) -> Result<Vec<HistoryPoint>, ApiError> {
            *self.last_range.lock().unwrap() = Some((start_year, end_year));
            Ok(self.points.clone())
        }

        async fn fetch_calculation(&self, input: &TaxInput) -> Result<TaxCalculation, ApiError> {
            Ok(TaxCalculation {
                total_tax_paid: "1100".to_string(),
                avg_rate: "10".to_string(),
                message: None,
                brackets: vec![TaxBracket {
                    year: input.year,
                    status: input.status,
                    range_start: "0".to_string(),
                    range_end: None,
                    tax_rate: "10%".to_string(),
                    tax_paid: "1100".to_string(),
                }],
            })
        }
    }

    #[tokio::test]
    async fn years_are_listed_newest_first() {
        let api = StubApi {
            years: vec![2021, 2023, 2022],
            ..StubApi::default()
        };

        let report = YearsReport::load(&api).await.unwrap();

        assert_eq!(report.years, vec![2023, 2022, 2021]);
        assert_eq!(report.to_string(), "Available years (3):\n  2023, 2022, 2021");
    }

    #[tokio::test]
    async fn empty_years_report() {
        let report = YearsReport::load(&StubApi::default()).await.unwrap();
        assert_eq!(report.to_string(), "No years available.");
    }

    #[tokio::test]
    async fn history_request_uses_normalized_range() {
        let api = StubApi {
            points: vec![HistoryPoint::new(1990, 28.0)],
            ..StubApi::default()
        };

        let report = HistoryReport::load(
            &api,
            FilingStatus::Single,
            HistoryMetric::TopRate,
            1995,
            1985,
        )
        .await
        .unwrap();

        assert_eq!(*api.last_range.lock().unwrap(), Some((1985, 1995)));
        assert_eq!(
            report.to_string(),
            "TOP_RATE for Single, 1985–1995\n  1990  28%"
        );
    }

    #[tokio::test]
    async fn count_metrics_print_raw_numbers() {
        let api = StubApi {
            points: vec![HistoryPoint::new(2023, 7.0)],
            ..StubApi::default()
        };

        let report = HistoryReport::load(
            &api,
            FilingStatus::MarriedFilingJointly,
            HistoryMetric::BracketCount,
            2023,
            2023,
        )
        .await
        .unwrap();

        assert!(report.to_string().ends_with("2023  7"));
    }

    #[tokio::test]
    async fn calculation_report_includes_breakdown() {
        let input = TaxInput {
            year: 2023,
            status: FilingStatus::Single,
            income: dec!(11000),
        };

        let report = CalculationReport::load(&StubApi::default(), input)
            .await
            .unwrap();
        let text = report.to_string();

        assert!(text.contains("Income:          $11,000"));
        assert!(text.contains("Total tax paid:  $1,100"));
        assert!(text.contains("Average rate:    10%"));
        assert!(text.contains("Tax Paid"));
        assert!(text.contains("∞"));
    }
}
