use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Widget,
    },
};

use crate::charts::radar_vertices;
use crate::dashboard::data::Score;
use crate::theme::Theme;

const RADIUS: f64 = 1.0;

/// Maturity radar: grid rings, axes and the animated value polygon
pub struct MaturityRadar<'a> {
    axes: &'a [Score],
    values: &'a [f64],
    theme: &'a Theme,
}

impl<'a> MaturityRadar<'a> {
    pub fn new(axes: &'a [Score], values: &'a [f64], theme: &'a Theme) -> Self {
        Self { axes, values, theme }
    }
}

/// Closed polygon edges through `vertices`
pub fn polygon_edges(vertices: &[(f64, f64)]) -> Vec<((f64, f64), (f64, f64))> {
    if vertices.len() < 2 {
        return Vec::new();
    }
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(&a, &b)| (a, b))
        .collect()
}

impl Widget for MaturityRadar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.axes.is_empty() {
            return;
        }
        let aspect = f64::from(area.width) / (f64::from(area.height) * 2.0);
        let span = RADIUS * 1.45;
        let center = (0.0, 0.0);

        let full = vec![100.0; self.axes.len()];
        let rings: Vec<Vec<(f64, f64)>> = [0.33, 0.66, 1.0]
            .iter()
            .map(|scale| radar_vertices(&full, 100.0, RADIUS * scale, center))
            .collect();
        let outer = radar_vertices(&full, 100.0, RADIUS, center);
        let label_anchor = radar_vertices(&full, 100.0, RADIUS * 1.25, center);
        let polygon = radar_vertices(self.values, 100.0, RADIUS, center);

        let grid = self.theme.track;
        let axis = self.theme.grey0;
        let value_color = self.theme.accent;
        let label_color = self.theme.fg0;

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-span * aspect, span * aspect])
            .y_bounds([-span, span])
            .paint(|ctx| {
                for ring in &rings {
                    for (a, b) in polygon_edges(ring) {
                        ctx.draw(&CanvasLine::new(a.0, a.1, b.0, b.1, grid));
                    }
                }
                for &(x, y) in &outer {
                    ctx.draw(&CanvasLine::new(center.0, center.1, x, y, axis));
                }
                ctx.layer();
                for (a, b) in polygon_edges(&polygon) {
                    ctx.draw(&CanvasLine::new(a.0, a.1, b.0, b.1, value_color));
                }
                for (score, &(x, y)) in self.axes.iter().zip(label_anchor.iter()) {
                    let offset = score.label.chars().count() as f64 * span * aspect / f64::from(area.width);
                    ctx.print(
                        x - offset,
                        y,
                        Span::styled(score.label.clone(), Style::default().fg(label_color)),
                    );
                }
            })
            .render(area, buf);
    }
}
