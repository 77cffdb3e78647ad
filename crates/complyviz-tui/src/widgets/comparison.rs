use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::charts::{counter_label, reduction_percent};
use crate::dashboard::data::Comparison;
use crate::theme::Theme;

/// Before/after counters; the "after" side waits for the "before" counter
pub struct BeforeAfter<'a> {
    comparison: &'a Comparison,
    before: f64,
    after: Option<f64>,
    settled: bool,
    theme: &'a Theme,
}

impl<'a> BeforeAfter<'a> {
    /// `after` is `None` until its stage has started
    pub fn new(
        comparison: &'a Comparison,
        before: f64,
        after: Option<f64>,
        settled: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            comparison,
            before,
            after,
            settled,
            theme,
        }
    }

    fn side(&self, label: &str, value: Option<f64>, color: ratatui::style::Color) -> Paragraph<'static> {
        let number = match value {
            Some(v) => counter_label(v, &self.comparison.suffix),
            None => "...".to_string(),
        };
        Paragraph::new(vec![
            Line::from(Span::styled(label.to_string(), Style::default().fg(self.theme.grey1))),
            Line::from(Span::styled(
                number,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
    }
}

impl Widget for BeforeAfter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(Line::from(Span::styled(
            self.comparison.metric.clone(),
            Style::default().fg(self.theme.fg1),
        )))
        .alignment(Alignment::Center)
        .render(rows[0], buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Percentage(10),
                Constraint::Percentage(45),
            ])
            .split(rows[1]);

        self.side(&self.comparison.before_label, Some(self.before), self.theme.at_risk)
            .render(columns[0], buf);
        Paragraph::new(Line::from(Span::styled("→", Style::default().fg(self.theme.grey0))))
            .alignment(Alignment::Center)
            .render(Rect::new(columns[1].x, columns[1].y + 1, columns[1].width, 1), buf);
        self.side(&self.comparison.after_label, self.after, self.theme.compliant)
            .render(columns[2], buf);

        if self.settled {
            let reduction = reduction_percent(self.comparison.before, self.comparison.after);
            Paragraph::new(Line::from(Span::styled(
                format!("{} faster", counter_label(reduction, "%")),
                Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .render(rows[2], buf);
        }
    }
}
