//! Bracket breakdown table.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use rates_core::TaxBracket;

use crate::utils::{format_amount_text, format_rate_text};

/// Shown as the upper bound of the open-ended top bracket.
pub const UNBOUNDED: &str = "∞";

/// Display strings for one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketRow {
    pub lower: String,
    pub upper: String,
    pub rate: String,
    pub tax_paid: String,
}

impl From<&TaxBracket> for BracketRow {
    fn from(b: &TaxBracket) -> Self {
        let upper = if b.is_unbounded() {
            UNBOUNDED.to_string()
        } else {
            format_amount_text(b.range_end.as_deref().unwrap_or_default())
        };
        Self {
            lower: format_amount_text(&b.range_start),
            upper,
            rate: format_rate_text(&b.tax_rate),
            tax_paid: format_amount_text(&b.tax_paid),
        }
    }
}

/// One row per bracket, in the order given.
pub fn bracket_rows(brackets: &[TaxBracket]) -> Vec<BracketRow> {
    brackets.iter().map(BracketRow::from).collect()
}

pub fn render_bracket_table(
    frame: &mut Frame,
    area: Rect,
    brackets: &[TaxBracket],
) {
    let header = Row::new(["Lower", "Upper", "Rate", "Tax Paid"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows = bracket_rows(brackets).into_iter().map(|r| {
        Row::new(vec![
            Cell::from(r.lower),
            Cell::from(r.upper),
            Cell::from(r.rate),
            Cell::from(r.tax_paid),
        ])
    });

    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(30),
        Constraint::Percentage(15),
        Constraint::Percentage(25),
    ];

    let title = match brackets.first() {
        Some(b) => format!(" Brackets ({} {}) ", b.year, b.status),
        None => " Brackets ".to_string(),
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use rates_core::FilingStatus;

    fn bracket(
        start: &str,
        end: Option<&str>,
        rate: &str,
        paid: &str,
    ) -> TaxBracket {
        TaxBracket {
            year: 2023,
            status: FilingStatus::Single,
            range_start: start.to_string(),
            range_end: end.map(str::to_string),
            tax_rate: rate.to_string(),
            tax_paid: paid.to_string(),
        }
    }

    #[test]
    fn unbounded_bracket_shows_infinity() {
        let brackets = vec![
            bracket("0", Some("11000"), "10%", "1100"),
            bracket("11000", None, "12%", "0"),
        ];

        let rows = bracket_rows(&brackets);

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            BracketRow {
                lower: "$0".to_string(),
                upper: "$11,000".to_string(),
                rate: "10%".to_string(),
                tax_paid: "$1,100".to_string(),
            }
        );
        assert_eq!(rows[1].upper, UNBOUNDED);
    }

    #[test]
    fn non_numeric_values_pass_through() {
        let rows = bracket_rows(&[bracket("n/a", Some("varies"), "12", "pending")]);

        assert_eq!(rows[0].lower, "n/a");
        assert_eq!(rows[0].upper, "varies");
        assert_eq!(rows[0].rate, "12%");
        assert_eq!(rows[0].tax_paid, "pending");
    }

    #[test]
    fn rows_keep_input_order() {
        let rows = bracket_rows(&[
            bracket("50000", None, "22%", "0"),
            bracket("0", Some("50000"), "10%", "5000"),
        ]);

        assert_eq!(rows[0].lower, "$50,000");
        assert_eq!(rows[1].lower, "$0");
    }

    #[test]
    fn renders_header_and_rows() {
        let brackets = vec![
            bracket("0", Some("11000"), "10%", "1100"),
            bracket("11000", None, "12%", "0"),
        ];
        let mut terminal = Terminal::new(TestBackend::new(70, 8)).unwrap();
        terminal
            .draw(|frame| render_bracket_table(frame, frame.area(), &brackets))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Tax Paid"));
        assert!(text.contains("$11,000"));
        assert!(text.contains(UNBOUNDED));
    }
}
