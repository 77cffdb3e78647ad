use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Points},
        Widget,
    },
};

use crate::charts::{counter_label, gauge_fill_ratio};
use crate::dashboard::data::Score;
use crate::theme::Theme;

const RING_SAMPLES: usize = 120;
const RING_RADIUS: f64 = 1.0;

/// Points on the ring from 12 o'clock clockwise covering `fraction` of it
pub fn arc_points(fraction: f64, samples: usize) -> Vec<(f64, f64)> {
    let count = (fraction.clamp(0.0, 1.0) * samples as f64).round() as usize;
    (0..count)
        .map(|i| {
            let angle = FRAC_PI_2 - TAU * i as f64 / samples as f64;
            (RING_RADIUS * angle.cos(), RING_RADIUS * angle.sin())
        })
        .collect()
}

/// Row of circular gauges with a centered percentage
pub struct GaugeRow<'a> {
    items: &'a [Score],
    values: &'a [f64],
    theme: &'a Theme,
}

impl<'a> GaugeRow<'a> {
    pub fn new(items: &'a [Score], values: &'a [f64], theme: &'a Theme) -> Self {
        Self {
            items,
            values,
            theme,
        }
    }

    fn render_gauge(&self, index: usize, area: Rect, buf: &mut Buffer) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        if area.height < 3 || area.width < 6 {
            return;
        }
        let value = self.values.get(index).copied().unwrap_or(0.0);
        let color = self.theme.score_color(item.value);

        let ring_area = Rect::new(area.x, area.y, area.width, area.height - 1);
        // Terminal cells are about twice as tall as wide
        let aspect = f64::from(ring_area.width) / (f64::from(ring_area.height) * 2.0);
        let span = RING_RADIUS * 1.2;

        let track = arc_points(1.0, RING_SAMPLES);
        let filled = arc_points(gauge_fill_ratio(value), RING_SAMPLES);
        let track_color = self.theme.track;

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-span * aspect, span * aspect])
            .y_bounds([-span, span])
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &track,
                    color: track_color,
                });
                ctx.layer();
                ctx.draw(&Points {
                    coords: &filled,
                    color,
                });
            })
            .render(ring_area, buf);

        let label = counter_label(value, "%");
        let center_y = ring_area.y + ring_area.height / 2;
        let label_x = ring_area.x + ring_area.width.saturating_sub(label.len() as u16) / 2;
        buf.set_string(
            label_x,
            center_y,
            &label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        );

        let name_x = area.x + area.width.saturating_sub(item.label.chars().count() as u16) / 2;
        buf.set_stringn(
            name_x,
            area.bottom() - 1,
            &item.label,
            area.width as usize,
            Style::default().fg(self.theme.fg0),
        );
    }
}

impl Widget for GaugeRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.items.is_empty() {
            return;
        }
        let count = self.items.len() as u32;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
            .split(area);

        for (index, column) in columns.iter().enumerate() {
            self.render_gauge(index, *column, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_points_cover_fraction() {
        assert_eq!(arc_points(0.0, 100).len(), 0);
        assert_eq!(arc_points(0.25, 100).len(), 25);
        assert_eq!(arc_points(1.0, 100).len(), 100);
        assert_eq!(arc_points(3.0, 100).len(), 100);

        let first = arc_points(1.0, 4)[0];
        assert!(first.0.abs() < 1e-9 && (first.1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_gauge_row_prints_percentages() {
        let items = vec![
            Score {
                label: "Access".to_string(),
                value: 88.0,
            },
            Score {
                label: "Backup".to_string(),
                value: 73.0,
            },
        ];
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        GaugeRow::new(&items, &[88.0, 36.6], &theme).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("88%"));
        assert!(text.contains("37%"));
        assert!(text.contains("Access"));
        assert!(text.contains("Backup"));
    }
}
