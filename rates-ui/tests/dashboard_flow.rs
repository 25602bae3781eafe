//! Drives the dashboard state through real effect execution against a fake
//! backend with per-request latency.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use rates_core::{
    ApiError, FilingStatus, HistoryMetric, HistoryPoint, RatesApi, TaxBracket, TaxCalculation,
    TaxInput,
};
use rates_ui::app::{self, Dispatcher};
use rates_ui::components::{UNBOUNDED, bracket_rows};
use rates_ui::messages::AppMessage;
use rates_ui::state::{AppState, CALCULATION_FAILED, TRENDS_FAILED, YEARS_FAILED};
use rust_decimal_macros::dec;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::{sleep, timeout};

const CURRENT_YEAR: i32 = 2026;

struct FakeApi {
    years: Result<Vec<i32>, ApiError>,
    fail_history: AtomicBool,
    fail_bracket_count: AtomicBool,
    fail_calculation: AtomicBool,
}

impl FakeApi {
    fn with_years(years: Result<Vec<i32>, ApiError>) -> Self {
        Self {
            years,
            fail_history: AtomicBool::new(false),
            fail_bracket_count: AtomicBool::new(false),
            fail_calculation: AtomicBool::new(false),
        }
    }

    fn top_rate(status: FilingStatus) -> f64 {
        match status {
            FilingStatus::Single => 37.0,
            FilingStatus::MarriedFilingJointly => 35.0,
            FilingStatus::MarriedFilingSeparately => 33.0,
            FilingStatus::HeadOfHousehold => 39.6,
        }
    }
}

#[async_trait]
impl RatesApi for FakeApi {
    async fn fetch_available_years(&self) -> Result<Vec<i32>, ApiError> {
        sleep(Duration::from_millis(5)).await;
        self.years.clone()
    }

    async fn fetch_history(
        &self,
        status: FilingStatus,
        metric: HistoryMetric,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<HistoryPoint>, ApiError> {
        // MFS answers slowly so it can be overtaken.
        let delay = match status {
            FilingStatus::MarriedFilingSeparately => 150,
            _ => 20,
        };
        sleep(Duration::from_millis(delay)).await;

        let bracket_count_down = metric == HistoryMetric::BracketCount
            && self.fail_bracket_count.load(Ordering::SeqCst);
        if self.fail_history.load(Ordering::SeqCst) || bracket_count_down {
            return Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        let value = match metric {
            HistoryMetric::BracketCount => 7.0,
            _ => Self::top_rate(status),
        };
        Ok(vec![
            HistoryPoint::new(start_year, value),
            HistoryPoint::new(end_year, value),
        ])
    }

    async fn fetch_calculation(&self, input: &TaxInput) -> Result<TaxCalculation, ApiError> {
        // Small incomes are slow.
        let delay = if input.income < dec!(1500) { 150 } else { 10 };
        sleep(Duration::from_millis(delay)).await;

        if self.fail_calculation.load(Ordering::SeqCst) {
            return Err(ApiError::Timeout);
        }
        Ok(TaxCalculation {
            total_tax_paid: input.income.to_string(),
            avg_rate: "10%".to_string(),
            message: None,
            brackets: vec![
                TaxBracket {
                    year: input.year,
                    status: input.status,
                    range_start: "0".to_string(),
                    range_end: Some("11000".to_string()),
                    tax_rate: "10%".to_string(),
                    tax_paid: "1100".to_string(),
                },
                TaxBracket {
                    year: input.year,
                    status: input.status,
                    range_start: "11000".to_string(),
                    range_end: None,
                    tax_rate: "12%".to_string(),
                    tax_paid: "0".to_string(),
                },
            ],
        })
    }
}

struct Harness {
    state: AppState,
    dispatcher: Dispatcher,
    rx: UnboundedReceiver<AppMessage>,
    api: Arc<FakeApi>,
}

impl Harness {
    fn start(api: FakeApi) -> Self {
        let api = Arc::new(api);
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(api.clone(), tx, Handle::current());
        let mut state = AppState::new(CURRENT_YEAR);
        dispatcher.dispatch(app::init(&mut state));
        Self {
            state,
            dispatcher,
            rx,
            api,
        }
    }

    /// Apply messages until nothing arrives for a while.
    async fn settle(&mut self) {
        while let Ok(Some(msg)) = timeout(Duration::from_millis(400), self.rx.recv()).await {
            let cmds = app::update(&mut self.state, msg);
            self.dispatcher.dispatch(cmds);
        }
    }
}

fn years(range: std::ops::RangeInclusive<i32>) -> Result<Vec<i32>, ApiError> {
    Ok(range.collect())
}

#[tokio::test]
async fn bootstrap_clamps_selections_and_refreshes() {
    let mut h = Harness::start(FakeApi::with_years(years(1913..=2023)));
    h.settle().await;

    assert_eq!(h.state.available_years.first(), Some(&2023));
    assert_eq!(h.state.filters.end_year, 2023);
    assert_eq!(h.state.filters.calc_year, 2023);
    assert_eq!(h.state.filters.start_year, 1924);
    // The refresh issued after clamping is the one displayed.
    assert_eq!(h.state.top_rate_series.last().map(|p| p.year), Some(2023));
    assert_eq!(h.state.bracket_count_series.len(), 2);
    assert!(!h.state.loading());
    assert!(h.state.error.is_none());
}

#[tokio::test]
async fn empty_years_fall_back_to_default_list() {
    let mut h = Harness::start(FakeApi::with_years(Ok(Vec::new())));
    h.settle().await;

    let options = h.state.calc_year_options();
    assert_eq!(options.first(), Some(&2025));
    assert_eq!(options.last(), Some(&1862));
    assert_eq!(h.state.filters.end_year, CURRENT_YEAR);
    assert!(h.state.error.is_none());
}

#[tokio::test]
async fn years_failure_keeps_defaults() {
    let mut h = Harness::start(FakeApi::with_years(Err(ApiError::Transport(
        "refused".to_string(),
    ))));
    h.settle().await;

    assert_eq!(h.state.error.as_deref(), Some(YEARS_FAILED));
    assert_eq!(h.state.filters.calc_year, CURRENT_YEAR - 1);
    assert_eq!(h.state.top_rate_series.len(), 2);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_series() {
    let mut h = Harness::start(FakeApi::with_years(years(1913..=2023)));
    h.settle().await;
    let before = h.state.top_rate_series.clone();

    h.api.fail_history.store(true, Ordering::SeqCst);
    let cmd = h.state.set_status(FilingStatus::MarriedFilingJointly);
    h.dispatcher.dispatch(cmd.into_iter().collect());
    h.settle().await;

    assert_eq!(h.state.error.as_deref(), Some(TRENDS_FAILED));
    assert_eq!(h.state.top_rate_series, before);
    assert!(!h.state.loading());
}

#[tokio::test]
async fn one_failed_metric_leaves_both_series_untouched() {
    let mut h = Harness::start(FakeApi::with_years(years(1913..=2023)));
    h.settle().await;
    let top_before = h.state.top_rate_series.clone();
    let count_before = h.state.bracket_count_series.clone();

    // The top-rate fetch alone would succeed with a different value.
    h.api.fail_bracket_count.store(true, Ordering::SeqCst);
    let cmd = h.state.set_status(FilingStatus::HeadOfHousehold);
    h.dispatcher.dispatch(cmd.into_iter().collect());
    h.settle().await;

    assert_eq!(h.state.error.as_deref(), Some(TRENDS_FAILED));
    assert_eq!(h.state.top_rate_series, top_before);
    assert_eq!(h.state.bracket_count_series, count_before);
    assert!(!h.state.loading());
}

#[tokio::test]
async fn slower_stale_refresh_is_discarded() {
    let mut h = Harness::start(FakeApi::with_years(years(1913..=2023)));
    h.settle().await;

    let slow = h.state.set_status(FilingStatus::MarriedFilingSeparately);
    h.dispatcher.dispatch(slow.into_iter().collect());
    let fast = h.state.set_status(FilingStatus::HeadOfHousehold);
    h.dispatcher.dispatch(fast.into_iter().collect());
    h.settle().await;

    assert_eq!(h.state.top_rate_series[0].value, 39.6);
    assert!(!h.state.loading());
}

#[tokio::test]
async fn later_calculation_is_displayed() {
    let mut h = Harness::start(FakeApi::with_years(years(1913..=2023)));
    h.settle().await;

    h.state.set_income(dec!(1000));
    let first = h.state.begin_calculation();
    h.dispatcher.dispatch(vec![first]);
    h.state.set_income(dec!(2000));
    let second = h.state.begin_calculation();
    h.dispatcher.dispatch(vec![second]);
    h.settle().await;

    let calc = h.state.calculation.as_ref().expect("calculation held");
    assert_eq!(calc.total_tax_paid, "2000");
    assert_eq!(h.state.calculated_for.as_ref().map(|i| i.income), Some(dec!(2000)));
    assert!(!h.state.loading());

    let rows = bracket_rows(&calc.brackets);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].upper, "$11,000");
    assert_eq!(rows[1].upper, UNBOUNDED);
}

#[tokio::test]
async fn failed_calculation_leaves_panel_absent() {
    let mut h = Harness::start(FakeApi::with_years(years(1913..=2023)));
    h.settle().await;

    h.api.fail_calculation.store(true, Ordering::SeqCst);
    let cmd = h.state.begin_calculation();
    h.dispatcher.dispatch(vec![cmd]);
    h.settle().await;

    assert_eq!(h.state.error.as_deref(), Some(CALCULATION_FAILED));
    assert!(h.state.calculation.is_none());
    assert!(!h.state.loading());
}
