use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// Hero banner with a drifting particle field behind the headline
pub struct HeroBanner<'a> {
    pub particles: &'a [(f64, f64)],
    pub completion: Option<f64>,
    pub theme: &'a Theme,
}

/// Map a unit-square position to a cell inside `area`
pub fn particle_cell(position: (f64, f64), area: Rect) -> Option<(u16, u16)> {
    if area.is_empty() {
        return None;
    }
    let x = (position.0.clamp(0.0, 1.0) * f64::from(area.width - 1)).round() as u16;
    let y = (position.1.clamp(0.0, 1.0) * f64::from(area.height - 1)).round() as u16;
    Some((area.x + x, area.y + y))
}

impl Widget for HeroBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        for (index, &position) in self.particles.iter().enumerate() {
            if let Some(at) = particle_cell(position, area) {
                let (symbol, color) = if index % 3 == 0 {
                    ("•", self.theme.accent)
                } else {
                    ("·", self.theme.grey0)
                };
                if let Some(cell) = buf.cell_mut(at) {
                    cell.set_symbol(symbol).set_fg(color);
                }
            }
        }

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Compliance, at a glance",
                Style::default().fg(self.theme.fg1).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Frameworks, controls and risk in one scrolling overview",
                Style::default().fg(self.theme.grey1),
            )),
        ];
        if let Some(completion) = self.completion {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Assessment {}% complete", completion.round() as i64),
                Style::default().fg(self.theme.score_color(completion)),
            )));
        }
        let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
        let text_area = Rect::new(area.x, top, area.width, area.bottom().saturating_sub(top));
        Paragraph::new(lines).alignment(Alignment::Center).render(text_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_cell_corners() {
        let area = Rect::new(2, 3, 11, 5);
        assert_eq!(particle_cell((0.0, 0.0), area), Some((2, 3)));
        assert_eq!(particle_cell((1.0, 1.0), area), Some((12, 7)));
        assert_eq!(particle_cell((5.0, -1.0), area), Some((12, 3)));
        assert_eq!(particle_cell((0.5, 0.5), Rect::new(0, 0, 0, 0)), None);
    }
}
