//! Stateless rendering pieces used by the dashboard.

pub mod bracket_table;
pub mod results;
pub mod trend_chart;

pub use bracket_table::{BracketRow, UNBOUNDED, bracket_rows, render_bracket_table};
pub use results::render_results;
pub use trend_chart::{ChartKind, TickFormatter, TrendChart};
