//! Filter bar: one cell per editable field, the focused one highlighted.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::models::FocusField;
use crate::state::AppState;
use crate::utils::format_currency;

/// Display text for a field's current value.
pub fn field_value(
    state: &AppState,
    field: FocusField,
) -> String {
    let f = &state.filters;
    match field {
        FocusField::Status => f.status.label().to_string(),
        FocusField::StartYear => f.start_year.to_string(),
        FocusField::EndYear => f.end_year.to_string(),
        FocusField::CalcYear => f.calc_year.to_string(),
        FocusField::Income => format_currency(f.income),
    }
}

pub fn filter_line(state: &AppState) -> Line<'static> {
    let mut spans = Vec::new();
    for field in FocusField::all() {
        let focused = *field == state.focus;
        let label_style = Style::default().fg(Color::DarkGray);
        let value_style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(format!("{}: ", field.label()), label_style));
        spans.push(Span::styled(format!(" {} ", field_value(state, *field)), value_style));
        spans.push(Span::raw("  "));
    }
    if state.loading() {
        spans.push(Span::styled("Loading…", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

pub fn render_filters(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
) {
    let bar = Paragraph::new(filter_line(state))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Filters "));
    frame.render_widget(bar, area);
}
