//! Application state for the tax rates dashboard.
//!
//! Every mutation that needs the network returns the [`Command`] to run;
//! results come back through the `apply_*` methods. Nothing here performs
//! I/O, so the whole state machine is testable without a runtime.

use rates_core::years::{EARLIEST_YEAR, YearBounds, fallback_years, sort_descending};
use rates_core::{ApiError, FilingStatus, HistoryPoint, TaxCalculation, TaxInput};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::messages::{Command, TrendSeries};
use crate::models::{Filters, FocusField};

pub const TRENDS_FAILED: &str = "Failed to load trends. Verify the API base URL.";
pub const CALCULATION_FAILED: &str = "Calculation failed. Check the endpoint and inputs.";
pub const YEARS_FAILED: &str = "Failed to load available years. Using defaults.";

#[derive(Debug, Clone)]
pub struct AppState {
    /// Year used for defaults and the fallback year list.
    pub current_year: i32,
    pub filters: Filters,
    pub focus: FocusField,

    /// Backend year list, newest first. Empty until the bootstrap succeeds
    /// with a non-empty list.
    pub available_years: Vec<i32>,

    pub top_rate_series: Vec<HistoryPoint>,
    pub bracket_count_series: Vec<HistoryPoint>,
    pub calculation: Option<TaxCalculation>,
    /// Inputs the held calculation was computed for.
    pub calculated_for: Option<TaxInput>,
    pub error: Option<String>,
    pub should_quit: bool,

    trend_generation: u64,
    trends_in_flight: bool,
    calc_request: u64,
    calc_in_flight: bool,
    calc_input: Option<TaxInput>,
}

impl AppState {
    pub fn new(current_year: i32) -> Self {
        Self {
            current_year,
            filters: Filters::new(current_year),
            focus: FocusField::default(),
            available_years: Vec::new(),
            top_rate_series: Vec::new(),
            bracket_count_series: Vec::new(),
            calculation: None,
            calculated_for: None,
            error: None,
            should_quit: false,
            trend_generation: 0,
            trends_in_flight: false,
            calc_request: 0,
            calc_in_flight: false,
            calc_input: None,
        }
    }

    /// True while the latest trend refresh or calculator run is pending.
    pub fn loading(&self) -> bool {
        self.trends_in_flight || self.calc_in_flight
    }

    pub fn trend_generation(&self) -> u64 {
        self.trend_generation
    }

    /// Years offered by the calculator's year selector, newest first.
    pub fn calc_year_options(&self) -> Vec<i32> {
        if self.available_years.is_empty() {
            fallback_years(self.current_year)
        } else {
            self.available_years.clone()
        }
    }

    /// Limits for the trend range inputs.
    pub fn year_limits(&self) -> YearBounds {
        YearBounds::from_years(&self.available_years).unwrap_or(YearBounds {
            min: EARLIEST_YEAR,
            max: self.current_year,
        })
    }

    // --- effect starts ---

    /// Begin a trend refresh for the current filters. Any refresh already
    /// in flight becomes stale.
    pub fn begin_trend_refresh(&mut self) -> Command {
        self.trend_generation += 1;
        self.trends_in_flight = true;
        self.error = None;
        let (start_year, end_year) = self.filters.trend_range();
        debug!(
            generation = self.trend_generation,
            status = %self.filters.status,
            start_year,
            end_year,
            "trend refresh started"
        );
        Command::LoadTrends {
            generation: self.trend_generation,
            status: self.filters.status,
            start_year,
            end_year,
        }
    }

    pub fn begin_calculation(&mut self) -> Command {
        self.calc_request += 1;
        self.calc_in_flight = true;
        self.error = None;
        let input = self.filters.to_tax_input();
        self.calc_input = Some(input.clone());
        info!(request = self.calc_request, "running calculator\n{}", self.filters);
        Command::RunCalculation {
            request: self.calc_request,
            input,
        }
    }

    // --- effect results ---

    /// Apply the years bootstrap: store the list and clamp every year
    /// selection into its bounds. Returns a trend refresh if the trend
    /// range moved.
    pub fn apply_years(
        &mut self,
        result: Result<Vec<i32>, ApiError>,
    ) -> Option<Command> {
        let years = match result {
            Ok(years) => years,
            Err(e) => {
                error!(error = %e, "loading available years failed");
                self.error = Some(YEARS_FAILED.to_string());
                return None;
            }
        };

        let years = sort_descending(years);
        let Some(bounds) = YearBounds::from_years(&years) else {
            warn!("backend returned no available years; keeping current selections");
            return None;
        };

        self.available_years = years;
        let before = self.filters.trend_range();
        self.filters.start_year = bounds.clamp(self.filters.start_year);
        self.filters.end_year = bounds.clamp(self.filters.end_year);
        self.filters.calc_year = bounds.clamp(self.filters.calc_year);
        debug!(min = bounds.min, max = bounds.max, "year selections clamped");

        (self.filters.trend_range() != before).then(|| self.begin_trend_refresh())
    }

    /// Apply a trend refresh result. Results from a superseded generation
    /// are dropped without touching any state.
    pub fn apply_trends(
        &mut self,
        generation: u64,
        result: Result<TrendSeries, ApiError>,
    ) {
        if generation != self.trend_generation {
            debug!(generation, latest = self.trend_generation, "discarding stale trend result");
            return;
        }
        self.trends_in_flight = false;
        match result {
            Ok(series) => {
                self.top_rate_series = series.top_rate;
                self.bracket_count_series = series.bracket_count;
            }
            Err(e) => {
                error!(error = %e, "loading trends failed");
                self.error = Some(TRENDS_FAILED.to_string());
            }
        }
    }

    /// Apply a calculator result. Only the latest run's outcome is shown.
    pub fn apply_calculation(
        &mut self,
        request: u64,
        result: Result<TaxCalculation, ApiError>,
    ) {
        if request != self.calc_request {
            debug!(request, latest = self.calc_request, "discarding superseded calculation");
            return;
        }
        self.calc_in_flight = false;
        match result {
            Ok(calc) => {
                self.calculation = Some(calc);
                self.calculated_for = self.calc_input.take();
            }
            Err(e) => {
                error!(error = %e, "calculation failed");
                self.error = Some(CALCULATION_FAILED.to_string());
            }
        }
    }

    // --- filter edits ---

    /// Each setter returns a trend refresh when the change affects the
    /// charts.
    pub fn set_status(
        &mut self,
        status: FilingStatus,
    ) -> Option<Command> {
        if self.filters.status == status {
            return None;
        }
        self.filters.status = status;
        Some(self.begin_trend_refresh())
    }

    pub fn set_start_year(
        &mut self,
        year: i32,
    ) -> Option<Command> {
        let year = self.year_limits().clamp(year);
        if self.filters.start_year == year {
            return None;
        }
        self.filters.start_year = year;
        Some(self.begin_trend_refresh())
    }

    pub fn set_end_year(
        &mut self,
        year: i32,
    ) -> Option<Command> {
        let year = self.year_limits().clamp(year);
        if self.filters.end_year == year {
            return None;
        }
        self.filters.end_year = year;
        Some(self.begin_trend_refresh())
    }

    /// Move the calculator year `steps` entries through the year options;
    /// positive steps go toward newer years.
    pub fn step_calc_year(
        &mut self,
        steps: i32,
    ) {
        let options = self.calc_year_options();
        if options.is_empty() {
            return;
        }
        let idx = options
            .iter()
            .position(|y| *y == self.filters.calc_year)
            .unwrap_or(0) as i64;
        let last = options.len() as i64 - 1;
        // options are newest first
        let new_idx = (idx - i64::from(steps)).clamp(0, last) as usize;
        self.filters.calc_year = options[new_idx];
    }

    pub fn set_income(
        &mut self,
        income: Decimal,
    ) {
        self.filters.income = income.max(Decimal::ZERO);
    }
}
