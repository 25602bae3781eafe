//! Year-over-year trend chart.
//!
//! A [`TrendChart`] is a plain description of what to draw; it holds no
//! state between frames. Line charts plot the series continuously, bar
//! charts show one integer bar per year.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use rates_core::HistoryPoint;

/// Formats a value for ticks and the tooltip.
pub type TickFormatter = fn(f64) -> String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

const BAR_WIDTH: u16 = 4;
const BAR_GAP: u16 = 1;

#[derive(Debug, Clone, Copy)]
pub struct TrendChart<'a> {
    title: &'a str,
    data: &'a [HistoryPoint],
    kind: ChartKind,
    series_name: &'a str,
    tick_formatter: Option<TickFormatter>,
    highlight_year: Option<i32>,
}

impl<'a> TrendChart<'a> {
    pub fn new(
        title: &'a str,
        data: &'a [HistoryPoint],
        kind: ChartKind,
        series_name: &'a str,
    ) -> Self {
        Self {
            title,
            data,
            kind,
            series_name,
            tick_formatter: None,
            highlight_year: None,
        }
    }

    pub fn tick_formatter(
        mut self,
        formatter: TickFormatter,
    ) -> Self {
        self.tick_formatter = Some(formatter);
        self
    }

    /// Year whose value the tooltip line reports. Falls back to the latest
    /// year when the year is not in the series.
    pub fn highlight_year(
        mut self,
        year: i32,
    ) -> Self {
        self.highlight_year = Some(year);
        self
    }

    /// Through the formatter when set, the raw number otherwise.
    pub fn format_value(
        &self,
        value: f64,
    ) -> String {
        match self.tick_formatter {
            Some(f) => f(value),
            None => value.to_string(),
        }
    }

    fn highlighted(&self) -> Option<&HistoryPoint> {
        self.highlight_year
            .and_then(|year| self.data.iter().find(|p| p.year == year))
            .or_else(|| self.data.iter().max_by_key(|p| p.year))
    }

    /// `Year 2023: Top Rate 37%`, or `None` for an empty series.
    pub fn tooltip(&self) -> Option<String> {
        self.highlighted().map(|p| {
            format!(
                "Year {}: {} {}",
                p.year,
                self.series_name,
                self.format_value(p.value)
            )
        })
    }

    /// Value-axis range. Always includes zero; bar charts round up to a
    /// whole number.
    pub fn y_bounds(&self) -> [f64; 2] {
        let min = self.data.iter().map(|p| p.value).fold(0.0, f64::min);
        let max = self.data.iter().map(|p| p.value).fold(0.0, f64::max);
        let top = if max > min { max * 1.1 } else { min + 1.0 };
        match self.kind {
            ChartKind::Line => [min, top],
            ChartKind::Bar => [min.floor(), top.ceil()],
        }
    }

    /// Bottom, middle, and top tick labels.
    pub fn y_labels(&self) -> Vec<String> {
        let [lo, hi] = self.y_bounds();
        let mid = (lo + hi) / 2.0;
        let ticks = match self.kind {
            ChartKind::Line => [lo, mid, hi].map(|v| (v * 10.0).round() / 10.0),
            ChartKind::Bar => [lo, mid, hi].map(f64::round),
        };
        ticks.iter().map(|v| self.format_value(*v)).collect()
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title));

        if self.data.is_empty() {
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from("No data for this range.".dark_gray()),
            ])
            .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        match self.kind {
            ChartKind::Line => self.render_line(frame, chunks[0]),
            ChartKind::Bar => self.render_bars(frame, chunks[0]),
        }

        if let Some(tip) = self.tooltip() {
            let tip = Span::styled(tip, Style::default().fg(Color::Yellow));
            frame.render_widget(Paragraph::new(Line::from(tip)), chunks[1]);
        }
    }

    /// Points ordered by year; the backend does not promise an order.
    fn by_year(&self) -> Vec<&HistoryPoint> {
        let mut points: Vec<&HistoryPoint> = self.data.iter().collect();
        points.sort_by_key(|p| p.year);
        points
    }

    /// At most `fit` points, evenly spaced, always including the
    /// highlighted year.
    pub fn bar_sample(
        &self,
        fit: usize,
    ) -> Vec<&HistoryPoint> {
        let ordered = self.by_year();
        let step = ordered.len().div_ceil(fit.max(1)).max(1);
        let mut sample: Vec<&HistoryPoint> = ordered.iter().copied().step_by(step).collect();

        let highlighted = self
            .highlighted()
            .and_then(|h| ordered.iter().position(|p| p.year == h.year));
        if let Some(idx) = highlighted {
            if let Some(slot) = sample.get_mut(idx / step) {
                *slot = ordered[idx];
            }
        }
        sample
    }

    fn render_line(
        &self,
        frame: &mut Frame,
        area: Rect,
    ) {
        let ordered = self.by_year();
        let points: Vec<(f64, f64)> = ordered
            .iter()
            .map(|p| (f64::from(p.year), p.value))
            .collect();
        let highlight: Vec<(f64, f64)> = self
            .highlighted()
            .map(|p| vec![(f64::from(p.year), p.value)])
            .unwrap_or_default();

        let first = ordered.first().map_or(0, |p| p.year);
        let last = ordered.last().map_or(0, |p| p.year);
        let x_labels = if first == last {
            vec![first.to_string()]
        } else {
            vec![
                first.to_string(),
                ((first + last) / 2).to_string(),
                last.to_string(),
            ]
        };

        let datasets = vec![
            Dataset::default()
                .name(self.series_name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&points),
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Yellow))
                .data(&highlight),
        ];

        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .bounds([f64::from(first), f64::from(last.max(first + 1))])
                    .labels(x_labels.into_iter().map(Span::raw).collect::<Vec<_>>()),
            )
            .y_axis(
                Axis::default()
                    .bounds(self.y_bounds())
                    .labels(
                        self.y_labels()
                            .into_iter()
                            .map(Span::raw)
                            .collect::<Vec<_>>(),
                    ),
            );

        frame.render_widget(chart, area);
    }

    fn render_bars(
        &self,
        frame: &mut Frame,
        area: Rect,
    ) {
        let labels = self.y_labels();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(1);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(label_width as u16 + 1),
                Constraint::Min(1),
            ])
            .split(area);

        let axis = bar_axis(&labels, label_width, columns[0].height);
        frame.render_widget(Paragraph::new(axis), columns[0]);

        let slot = usize::from(BAR_WIDTH + BAR_GAP);
        let fit = usize::from(columns[1].width) / slot;
        let highlight_year = self.highlighted().map(|p| p.year);

        let bars: Vec<Bar> = self
            .bar_sample(fit)
            .into_iter()
            .map(|p| {
                // Counts are whole; negative values cannot be drawn.
                let value = p.value.round().max(0.0) as u64;
                let style = if Some(p.year) == highlight_year {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Green)
                };
                Bar::default()
                    .value(value)
                    .label(Line::from(p.year.to_string()))
                    .text_value(self.format_value(value as f64))
                    .style(style)
                    .value_style(style.add_modifier(Modifier::REVERSED))
            })
            .collect();

        let chart = BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(BAR_WIDTH)
            .bar_gap(BAR_GAP)
            .max(self.y_bounds()[1].max(1.0) as u64)
            .direction(Direction::Vertical);

        frame.render_widget(chart, columns[1]);
    }
}

/// Tick labels for the bar chart, one per row of `height`. The bottom
/// label sits on the last row that holds bars.
fn bar_axis(
    labels: &[String],
    width: usize,
    height: u16,
) -> Vec<Line<'static>> {
    // The last row carries the year labels.
    let bar_rows = usize::from(height.saturating_sub(1)).max(1);
    let mut lines = vec![Line::from(""); usize::from(height)];
    let rows = [bar_rows - 1, (bar_rows - 1) / 2, 0];
    for (row, label) in rows.into_iter().zip(labels) {
        if let Some(line) = lines.get_mut(row) {
            let text = format!("{label:>width$}");
            *line = Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)));
        }
    }
    lines
}
