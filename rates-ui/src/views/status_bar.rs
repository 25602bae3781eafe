//! Status bar for displaying keyboard shortcuts.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Keyboard shortcut hint for the status bar.
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(
        key: &'static str,
        action: &'static str,
    ) -> Self {
        Self { key, action }
    }
}

/// `key action │ key action` with the keys highlighted.
pub fn status_line(hints: &[KeyHint]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, h) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(h.key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(" {}", h.action)));
    }
    Line::from(spans)
}

pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    hints: &[KeyHint],
) {
    frame.render_widget(Paragraph::new(status_line(hints)), area);
}

/// Dashboard key hints.
pub mod hints {
    use super::KeyHint;

    pub const TAB: KeyHint = KeyHint::new("Tab", "Next");
    pub const SHIFT_TAB: KeyHint = KeyHint::new("S-Tab", "Prev");
    pub const ADJUST: KeyHint = KeyHint::new("←/→", "Adjust");
    pub const PAGE: KeyHint = KeyHint::new("PgUp/PgDn", "×10");
    pub const ENTER: KeyHint = KeyHint::new("Enter", "Calculate");
    pub const REFRESH: KeyHint = KeyHint::new("r", "Refresh");
    pub const QUIT: KeyHint = KeyHint::new("q", "Quit");

    pub const DASHBOARD: [KeyHint; 7] = [TAB, SHIFT_TAB, ADJUST, PAGE, ENTER, REFRESH, QUIT];
}
