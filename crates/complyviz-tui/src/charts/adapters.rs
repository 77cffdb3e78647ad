//! Pure mappings from animated values to visual attributes
//!
//! Nothing here knows about time. Widgets read live values from a sequencer
//! and pass them through these functions at draw time.

use std::f64::consts::{FRAC_PI_2, TAU};

/// Bar length as a percentage of its track, clamped to [0, 100]
pub fn percent_of_track(value: f64, max: f64) -> f64 {
    if !value.is_finite() || !max.is_finite() || max <= 0.0 {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

/// Filled cells of a track `width` cells wide
pub fn track_cells(value: f64, max: f64, width: u16) -> u16 {
    let filled = percent_of_track(value, max) / 100.0 * f64::from(width);
    (filled.round() as u16).min(width)
}

/// Offset of a circular gauge stroke: `circumference * (1 - value/100)`
///
/// `value_percent` is clamped to [0, 100], so the offset stays within
/// [0, circumference].
pub fn stroke_dashoffset(circumference: f64, value_percent: f64) -> f64 {
    let value = if value_percent.is_finite() {
        value_percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    circumference * (1.0 - value / 100.0)
}

/// Share of a gauge arc that is drawn, derived from the dash offset
pub fn gauge_fill_ratio(value_percent: f64) -> f64 {
    1.0 - stroke_dashoffset(1.0, value_percent)
}

/// Heat-map cell visibility: a binary step, shown once its animator has
/// reached 1
pub fn heat_cell_step(value: f64) -> f64 {
    if value >= 1.0 {
        1.0
    } else {
        0.0
    }
}

/// Polygon vertices of a radar chart
///
/// Axis 0 points straight up; axes proceed clockwise. Values are scaled by
/// `max` and clamped to the outer ring.
pub fn radar_vertices(values: &[f64], max: f64, radius: f64, center: (f64, f64)) -> Vec<(f64, f64)> {
    let count = values.len();
    if count == 0 {
        return Vec::new();
    }
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let scale = percent_of_track(value, max) / 100.0;
            let angle = FRAC_PI_2 - TAU * index as f64 / count as f64;
            (
                center.0 + radius * scale * angle.cos(),
                center.1 + radius * scale * angle.sin(),
            )
        })
        .collect()
}

/// Number of timeline steps revealed, counting from the first step
///
/// A step counts once its animator reached 1; reveal stops at the first step
/// still in flight.
pub fn timeline_revealed(values: &[f64]) -> usize {
    values.iter().take_while(|&&v| v >= 1.0).count()
}

/// Relative reduction from `before` to `after` in percent
pub fn reduction_percent(before: f64, after: f64) -> f64 {
    if before <= 0.0 || !before.is_finite() || !after.is_finite() {
        return 0.0;
    }
    ((before - after) / before * 100.0).clamp(0.0, 100.0)
}

/// Counter text for an animated value, rounded to the nearest integer
pub fn counter_label(value: f64, suffix: &str) -> String {
    format!("{}{}", value.round() as i64, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_percent_of_track() {
        assert!(close(percent_of_track(46.0, 92.0), 50.0));
        assert!(close(percent_of_track(120.0, 100.0), 100.0));
        assert!(close(percent_of_track(-5.0, 100.0), 0.0));
        assert!(close(percent_of_track(10.0, 0.0), 0.0));
        assert!(close(percent_of_track(f64::NAN, 100.0), 0.0));
    }

    #[test]
    fn test_track_cells() {
        assert_eq!(track_cells(50.0, 100.0, 40), 20);
        assert_eq!(track_cells(100.0, 100.0, 40), 40);
        assert_eq!(track_cells(0.0, 100.0, 40), 0);
        assert_eq!(track_cells(50.0, 100.0, 0), 0);
    }

    #[test]
    fn test_stroke_dashoffset() {
        let circumference = 2.0 * std::f64::consts::PI * 40.0;
        assert!(close(stroke_dashoffset(circumference, 0.0), circumference));
        assert!(close(stroke_dashoffset(circumference, 100.0), 0.0));
        assert!(close(stroke_dashoffset(circumference, 75.0), circumference * 0.25));
        assert!(close(stroke_dashoffset(circumference, 150.0), 0.0));
    }

    #[test]
    fn test_gauge_fill_ratio() {
        assert!(close(gauge_fill_ratio(81.0), 0.81));
        assert!(close(gauge_fill_ratio(-3.0), 0.0));
    }

    #[test]
    fn test_heat_cell_is_binary() {
        assert_eq!(heat_cell_step(0.0), 0.0);
        assert_eq!(heat_cell_step(0.99), 0.0);
        assert_eq!(heat_cell_step(1.0), 1.0);
    }

    #[test]
    fn test_radar_vertices() {
        let vertices = radar_vertices(&[100.0, 50.0, 100.0, 0.0], 100.0, 10.0, (0.0, 0.0));
        assert_eq!(vertices.len(), 4);
        // Top
        assert!(close(vertices[0].0, 0.0) && close(vertices[0].1, 10.0));
        // Right, half scale
        assert!(close(vertices[1].0, 5.0) && close(vertices[1].1, 0.0));
        // Bottom
        assert!(close(vertices[2].0, 0.0) && close(vertices[2].1, -10.0));
        // Zero collapses to the center
        assert!(close(vertices[3].0, 0.0) && close(vertices[3].1, 0.0));

        assert!(radar_vertices(&[], 100.0, 10.0, (0.0, 0.0)).is_empty());
    }

    #[test]
    fn test_timeline_revealed() {
        assert_eq!(timeline_revealed(&[1.0, 1.0, 0.4, 1.0]), 2);
        assert_eq!(timeline_revealed(&[0.0, 0.0]), 0);
        assert_eq!(timeline_revealed(&[1.0, 1.0]), 2);
    }

    #[test]
    fn test_reduction_percent() {
        assert!(close(reduction_percent(40.0, 4.0), 90.0));
        assert!(close(reduction_percent(0.0, 4.0), 0.0));
        assert!(close(reduction_percent(10.0, 20.0), 0.0));
    }

    #[test]
    fn test_counter_label() {
        assert_eq!(counter_label(80.5, "%"), "81%");
        assert_eq!(counter_label(3.2, " days"), "3 days");
    }
}
