use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rates_core::years::DEFAULT_START_YEAR;
use rates_core::{FilingStatus, HistoryMetric, TaxInput};
use rates_http::HttpRatesApi;
use rust_decimal::Decimal;
use tracing::debug;

use rates_ui::config::{DEFAULT_LOG_LEVEL, Overrides, Settings};
use rates_ui::logging::{init_logging, set_log_level};
use rates_ui::reports::{CalculationReport, HistoryReport, YearsReport};
use rates_ui::terminal::run_dashboard;
use rates_ui::{current_year, utils};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Historical U.S. federal income tax rates.
///
/// Without a subcommand, opens the interactive dashboard: trend charts for
/// the top marginal rate and the bracket count, plus a bracket calculator.
#[derive(Debug, Parser)]
#[command(name = "TaxRates", version)]
struct Cli {
    /// TOML file with `base_url`, `timeout_secs`, `log_level`, `log_file`.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. `http://localhost:8080/api`.
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log level or `RUST_LOG`-style filter; overrides `RUST_LOG`.
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    /// Where the dashboard writes its log.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive terminal dashboard (default).
    Dashboard,

    /// List the years the backend has data for.
    Years,

    /// Print one metric over a range of years.
    History {
        /// Filing status code: S, MFJ, MFS, HOH.
        #[arg(long, default_value = "S")]
        status: FilingStatus,

        /// TOP_RATE, BRACKET_COUNT, AVERAGE_RATE or MIN_RATE.
        #[arg(long, default_value = "TOP_RATE", value_parser = parse_metric)]
        metric: HistoryMetric,

        #[arg(long, default_value_t = DEFAULT_START_YEAR)]
        start: i32,

        /// Defaults to the current year.
        #[arg(long)]
        end: Option<i32>,
    },

    /// Calculate tax for one income and print the bracket breakdown.
    Calc {
        /// Defaults to last year.
        #[arg(long)]
        year: Option<i32>,

        /// Filing status code: S, MFJ, MFS, HOH.
        #[arg(long, default_value = "S")]
        status: FilingStatus,

        /// Accepts `85000`, `85,000` or `$85,000.00`; must not be negative.
        #[arg(long, default_value = "85000", value_parser = utils::parse_income)]
        income: Decimal,
    },
}

fn parse_metric(s: &str) -> Result<HistoryMetric, String> {
    HistoryMetric::parse(s).ok_or_else(|| format!("unknown metric '{s}'"))
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.api_url.clone(),
            timeout_secs: self.timeout,
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(DEFAULT_LOG_LEVEL);

    let settings =
        Settings::load(cli.config.as_deref(), cli.overrides()).context("invalid configuration")?;
    if let Some(level) = &settings.log_level {
        set_log_level(level)?;
    }
    debug!(base_url = %settings.api.base_url, timeout = ?settings.api.timeout, "settings resolved");

    let api = HttpRatesApi::new(settings.api.clone()).context("failed to build HTTP client")?;
    let year = current_year();

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => run_dashboard(Arc::new(api), year, &settings.log_file)?,
        Commands::Years => {
            let report = YearsReport::load(&api)
                .await
                .context("failed to load available years")?;
            println!("{report}");
        }
        Commands::History {
            status,
            metric,
            start,
            end,
        } => {
            let report = HistoryReport::load(&api, status, metric, start, end.unwrap_or(year))
                .await
                .context("failed to load history")?;
            println!("{report}");
        }
        Commands::Calc {
            year: calc_year,
            status,
            income,
        } => {
            let input = TaxInput {
                year: calc_year.unwrap_or(year - 1),
                status,
                income,
            };
            let report = CalculationReport::load(&api, input)
                .await
                .context("calculation failed")?;
            println!("{report}");
        }
    }

    Ok(())
}
