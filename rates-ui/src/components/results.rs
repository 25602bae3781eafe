//! Calculator results panel.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use rates_core::{TaxCalculation, TaxInput};

use super::bracket_table::render_bracket_table;
use crate::utils::{format_amount_text, format_currency, format_rate_text};

fn field<'a>(
    label: &'a str,
    value: String,
) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<16}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

/// Summary lines for a calculation. `input` is what the calculation was
/// run with, when known.
pub fn summary_lines(
    calc: &TaxCalculation,
    input: Option<&TaxInput>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(input) = input {
        lines.push(field("Year", input.year.to_string()));
        lines.push(field("Filing status", input.status.label().to_string()));
        lines.push(field("Income", format_currency(input.income)));
    }
    lines.push(field("Total tax paid", format_amount_text(&calc.total_tax_paid)));
    lines.push(field("Average rate", format_rate_text(&calc.avg_rate)));
    if let Some(message) = &calc.message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines
}

/// Summary above the bracket table, or a hint when nothing has been
/// calculated yet.
pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    calc: Option<&TaxCalculation>,
    input: Option<&TaxInput>,
) {
    let block = Block::default().borders(Borders::ALL).title(" Calculator ");

    let Some(calc) = calc else {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from("Press Enter to calculate tax for the selected year and income."),
        ])
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let summary = summary_lines(calc, input);
    let summary_height = u16::try_from(summary.len()).unwrap_or(u16::MAX).saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(summary_height), Constraint::Min(3)])
        .split(area);

    frame.render_widget(
        Paragraph::new(summary).wrap(Wrap { trim: true }).block(block),
        chunks[0],
    );
    render_bracket_table(frame, chunks[1], &calc.brackets);
}
