use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::charts::{counter_label, track_cells};
use crate::dashboard::data::Score;
use crate::theme::Theme;

const VALUE_WIDTH: u16 = 5;

/// Horizontal score bars, one row per item with a blank row between
pub struct ScoreBars<'a> {
    items: &'a [Score],
    values: &'a [f64],
    max: f64,
    theme: &'a Theme,
}

impl<'a> ScoreBars<'a> {
    pub fn new(items: &'a [Score], values: &'a [f64], theme: &'a Theme) -> Self {
        Self {
            items,
            values,
            max: 100.0,
            theme,
        }
    }

    /// Rows needed to draw `count` bars
    pub fn height_for(count: usize) -> u16 {
        (count as u16).saturating_mul(2).saturating_sub(1)
    }
}

impl Widget for ScoreBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let label_width = self
            .items
            .iter()
            .map(|item| item.label.chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 1;
        let track_width = area.width.saturating_sub(label_width + VALUE_WIDTH + 1);
        let spacing = if area.height >= Self::height_for(self.items.len()) { 2 } else { 1 };

        for (index, item) in self.items.iter().enumerate() {
            let y = area.y + index as u16 * spacing;
            if y >= area.bottom() {
                break;
            }
            let value = self.values.get(index).copied().unwrap_or(0.0);
            let color = self.theme.score_color(item.value);

            buf.set_stringn(
                area.x,
                y,
                &item.label,
                label_width as usize,
                Style::default().fg(self.theme.fg0),
            );

            let filled = track_cells(value, self.max, track_width);
            let track_x = area.x + label_width;
            for offset in 0..track_width {
                if let Some(cell) = buf.cell_mut((track_x + offset, y)) {
                    if offset < filled {
                        cell.set_symbol("█").set_fg(color);
                    } else {
                        cell.set_symbol("░").set_fg(self.theme.track);
                    }
                }
            }

            buf.set_stringn(
                track_x + track_width + 1,
                y,
                counter_label(value, "%"),
                VALUE_WIDTH as usize,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }
    }
}
