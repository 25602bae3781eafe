//! Orchestration: turning keys and effect results into state changes, and
//! running the resulting commands against a [`RatesApi`].

use std::sync::Arc;

use rates_core::{ApiError, FilingStatus, HistoryMetric, RatesApi};
use rust_decimal::Decimal;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::keymap::KeyAction;
use crate::messages::{AppMessage, Command, TrendSeries};
use crate::models::FocusField;
use crate::state::AppState;

/// Incomes above this are not accepted from the keyboard.
const MAX_INCOME_DIGITS: usize = 12;

/// Commands issued once when the dashboard starts: the years bootstrap and
/// the first trend refresh.
pub fn init(state: &mut AppState) -> Vec<Command> {
    vec![Command::LoadYears, state.begin_trend_refresh()]
}

/// Feed an effect result into the state.
pub fn update(
    state: &mut AppState,
    msg: AppMessage,
) -> Vec<Command> {
    match msg {
        AppMessage::YearsLoaded(result) => state.apply_years(result).into_iter().collect(),
        AppMessage::TrendsLoaded { generation, result } => {
            state.apply_trends(generation, result);
            Vec::new()
        }
        AppMessage::CalculationLoaded { request, result } => {
            state.apply_calculation(request, result);
            Vec::new()
        }
    }
}

/// Apply a keyboard action to the focused filter.
pub fn handle_key(
    state: &mut AppState,
    action: KeyAction,
) -> Vec<Command> {
    let cmd = match action {
        KeyAction::Quit => {
            state.should_quit = true;
            None
        }
        KeyAction::NextField => {
            state.focus = state.focus.next();
            None
        }
        KeyAction::PrevField => {
            state.focus = state.focus.previous();
            None
        }
        KeyAction::Increase => adjust_focused(state, 1),
        KeyAction::Decrease => adjust_focused(state, -1),
        KeyAction::IncreaseMore => adjust_focused(state, 10),
        KeyAction::DecreaseMore => adjust_focused(state, -10),
        KeyAction::Digit(d) => {
            if state.focus == FocusField::Income {
                push_income_digit(state, d);
            }
            None
        }
        KeyAction::Backspace => {
            if state.focus == FocusField::Income {
                let income = (state.filters.income / Decimal::TEN).trunc();
                state.set_income(income);
            }
            None
        }
        KeyAction::RunCalculator => Some(state.begin_calculation()),
        KeyAction::Refresh => Some(state.begin_trend_refresh()),
        KeyAction::None => None,
    };
    cmd.into_iter().collect()
}

/// `steps` of ±1 move years by one and income by 100; ±10 by ten and 1000.
fn adjust_focused(
    state: &mut AppState,
    steps: i32,
) -> Option<Command> {
    match state.focus {
        FocusField::Status => {
            let status = if steps > 0 {
                state.filters.status.next()
            } else {
                state.filters.status.previous()
            };
            state.set_status(status)
        }
        FocusField::StartYear => state.set_start_year(state.filters.start_year + steps),
        FocusField::EndYear => state.set_end_year(state.filters.end_year + steps),
        FocusField::CalcYear => {
            state.step_calc_year(steps);
            None
        }
        FocusField::Income => {
            let step = Decimal::from(steps.signum()) * income_step(steps);
            state.set_income(state.filters.income + step);
            None
        }
    }
}

fn income_step(steps: i32) -> Decimal {
    if steps.unsigned_abs() >= 10 {
        Decimal::from(1000)
    } else {
        Decimal::ONE_HUNDRED
    }
}

fn push_income_digit(
    state: &mut AppState,
    digit: u8,
) {
    let whole = state.filters.income.trunc();
    if whole.to_string().len() >= MAX_INCOME_DIGITS {
        return;
    }
    state.set_income(whole * Decimal::TEN + Decimal::from(digit));
}

// --- effects ---

/// Fetch both trend metrics concurrently. Either failure fails the pair.
pub async fn load_trends(
    api: &dyn RatesApi,
    status: FilingStatus,
    start_year: i32,
    end_year: i32,
) -> Result<TrendSeries, ApiError> {
    let (top_rate, bracket_count) = tokio::try_join!(
        api.fetch_history(status, HistoryMetric::TopRate, start_year, end_year),
        api.fetch_history(status, HistoryMetric::BracketCount, start_year, end_year),
    )?;
    Ok(TrendSeries {
        top_rate,
        bracket_count,
    })
}

/// Run one command to completion and wrap its outcome as a message.
pub async fn execute(
    cmd: Command,
    api: &dyn RatesApi,
) -> AppMessage {
    match cmd {
        Command::LoadYears => AppMessage::YearsLoaded(api.fetch_available_years().await),
        Command::LoadTrends {
            generation,
            status,
            start_year,
            end_year,
        } => AppMessage::TrendsLoaded {
            generation,
            result: load_trends(api, status, start_year, end_year).await,
        },
        Command::RunCalculation { request, input } => AppMessage::CalculationLoaded {
            request,
            result: api.fetch_calculation(&input).await,
        },
    }
}

/// Spawns commands on a runtime and posts their results back to the UI
/// loop.
pub struct Dispatcher {
    api: Arc<dyn RatesApi>,
    tx: UnboundedSender<AppMessage>,
    runtime: Handle,
}

impl Dispatcher {
    pub fn new(
        api: Arc<dyn RatesApi>,
        tx: UnboundedSender<AppMessage>,
        runtime: Handle,
    ) -> Self {
        Self { api, tx, runtime }
    }

    pub fn dispatch(
        &self,
        commands: Vec<Command>,
    ) {
        for cmd in commands {
            let api = Arc::clone(&self.api);
            let tx = self.tx.clone();
            self.runtime.spawn(async move {
                let msg = execute(cmd, api.as_ref()).await;
                if tx.send(msg).is_err() {
                    debug!("dashboard closed before effect finished");
                }
            });
        }
    }
}
