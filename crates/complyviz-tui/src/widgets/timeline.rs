use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::charts::timeline_revealed;
use crate::dashboard::data::Milestone;
use crate::theme::Theme;

const DATE_WIDTH: u16 = 11;

/// Incident timeline revealed one milestone at a time
///
/// `progress` holds one value in [0, 1] per milestone. Revealed milestones
/// show their text; the milestone in flight grows its connector.
pub struct IncidentTimeline<'a> {
    steps: &'a [Milestone],
    progress: &'a [f64],
    theme: &'a Theme,
}

impl<'a> IncidentTimeline<'a> {
    pub fn new(steps: &'a [Milestone], progress: &'a [f64], theme: &'a Theme) -> Self {
        Self {
            steps,
            progress,
            theme,
        }
    }
}

impl Widget for IncidentTimeline<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let revealed = timeline_revealed(self.progress);
        let text_x = area.x + DATE_WIDTH + 3;
        let text_width = area.right().saturating_sub(text_x) as usize;

        for (index, step) in self.steps.iter().enumerate() {
            let y = area.y + index as u16 * 2;
            if y >= area.bottom() {
                break;
            }
            let value = self.progress.get(index).copied().unwrap_or(0.0);

            if index < revealed {
                buf.set_string(
                    area.x,
                    y,
                    step.date.format("%Y-%m-%d").to_string(),
                    Style::default().fg(self.theme.grey1),
                );
                buf.set_string(area.x + DATE_WIDTH, y, "●", Style::default().fg(self.theme.accent));
                buf.set_stringn(
                    text_x,
                    y,
                    &step.title,
                    text_width,
                    Style::default().fg(self.theme.fg1).add_modifier(Modifier::BOLD),
                );
                let title_len = step.title.chars().count();
                if text_width > title_len + 2 {
                    buf.set_stringn(
                        text_x + title_len as u16 + 2,
                        y,
                        &step.detail,
                        text_width - title_len - 2,
                        Style::default().fg(self.theme.fg0),
                    );
                }
            } else {
                let marker = if index == revealed && value > 0.0 { "◐" } else { "○" };
                buf.set_string(area.x + DATE_WIDTH, y, marker, Style::default().fg(self.theme.grey0));
            }

            // Connector to the next milestone
            if index + 1 < self.steps.len() && y + 1 < area.bottom() {
                let next = self.progress.get(index + 1).copied().unwrap_or(0.0);
                let color = if index < revealed && next > 0.0 {
                    self.theme.accent
                } else {
                    self.theme.track
                };
                buf.set_string(area.x + DATE_WIDTH, y + 1, "│", Style::default().fg(color));
            }
        }
    }
}
