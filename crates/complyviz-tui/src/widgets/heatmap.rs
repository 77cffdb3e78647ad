use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::charts::heat_cell_step;
use crate::dashboard::data::RiskMatrix;
use crate::theme::Theme;

/// Risk heat map; each cell pops in once its own animator finishes
pub struct RiskHeatmap<'a> {
    matrix: &'a RiskMatrix,
    values: &'a [f64],
    theme: &'a Theme,
}

impl<'a> RiskHeatmap<'a> {
    pub fn new(matrix: &'a RiskMatrix, values: &'a [f64], theme: &'a Theme) -> Self {
        Self {
            matrix,
            values,
            theme,
        }
    }
}

impl Widget for RiskHeatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.matrix.columns.is_empty() {
            return;
        }
        let label_width = self
            .matrix
            .rows
            .iter()
            .map(|r| r.chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 1;
        let cell_width = (area.width.saturating_sub(label_width) / self.matrix.columns.len() as u16).max(1);
        let header_style = Style::default().fg(self.theme.grey1);

        for (column, name) in self.matrix.columns.iter().enumerate() {
            let x = area.x + label_width + column as u16 * cell_width;
            buf.set_stringn(x, area.y, name, cell_width.saturating_sub(1) as usize, header_style);
        }

        for (row, name) in self.matrix.rows.iter().enumerate() {
            let y = area.y + 1 + row as u16;
            if y >= area.bottom() {
                break;
            }
            buf.set_stringn(area.x, y, name, label_width as usize, Style::default().fg(self.theme.fg0));

            for column in 0..self.matrix.columns.len() {
                let index = row * self.matrix.columns.len() + column;
                let shown = heat_cell_step(self.values.get(index).copied().unwrap_or(0.0)) >= 1.0;
                let x = area.x + label_width + column as u16 * cell_width;
                let width = cell_width.saturating_sub(1);
                let (symbol, color) = if shown {
                    ("█", self.theme.heat_color(self.matrix.level(row, column)))
                } else {
                    ("·", self.theme.grey0)
                };
                for offset in 0..width {
                    if let Some(cell) = buf.cell_mut((x + offset, y)) {
                        cell.set_symbol(symbol).set_fg(color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> RiskMatrix {
        RiskMatrix {
            rows: vec!["A".to_string(), "B".to_string()],
            columns: vec!["x".to_string(), "y".to_string()],
            levels: vec![1, 2, 3, 4],
        }
    }

    #[test]
    fn test_cells_appear_only_when_done() {
        let theme = Theme::default();
        let matrix = matrix();
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);

        // label width 2, cell width 4, 3 glyphs per cell
        RiskHeatmap::new(&matrix, &[1.0, 0.6, 0.0, 1.0], &theme).render(area, &mut buf);

        assert_eq!(buf[(2, 1)].symbol(), "█");
        assert_eq!(buf[(6, 1)].symbol(), "·");
        assert_eq!(buf[(2, 2)].symbol(), "·");
        assert_eq!(buf[(6, 2)].symbol(), "█");
        assert_eq!(buf[(6, 2)].fg, theme.heat_color(4));
    }
}
