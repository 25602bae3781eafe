//! Full-screen dashboard layout.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::filters::render_filters;
use super::status_bar::{hints, render_status_bar};
use crate::components::{ChartKind, TrendChart, render_results};
use crate::state::AppState;
use crate::utils::format_percent;

pub fn render_dashboard(
    frame: &mut Frame,
    state: &AppState,
) {
    let error_height = u16::from(state.error.is_some());
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(error_height),
            Constraint::Percentage(45),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_filters(frame, rows[0], state);

    if let Some(error) = &state.error {
        let line = Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), rows[1]);
    }

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    let calc_year = state.filters.calc_year;
    TrendChart::new(
        "Top marginal rate",
        &state.top_rate_series,
        ChartKind::Line,
        "Top Rate",
    )
    .tick_formatter(format_percent)
    .highlight_year(calc_year)
    .render(frame, charts[0]);

    TrendChart::new(
        "Bracket count",
        &state.bracket_count_series,
        ChartKind::Bar,
        "Brackets",
    )
    .highlight_year(calc_year)
    .render(frame, charts[1]);

    render_results(
        frame,
        rows[3],
        state.calculation.as_ref(),
        state.calculated_for.as_ref(),
    );

    render_status_bar(frame, rows[4], &hints::DASHBOARD);
}
