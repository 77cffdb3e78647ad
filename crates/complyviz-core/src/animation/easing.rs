//! Pure easing functions
//!
//! Every curve maps progress in [0, 1] to eased progress in [0, 1] with
//! `f(0) = 0` and `f(1) = 1`. Inputs outside the range are clamped, so the same
//! value can drive any number of concurrent runs without shared state.

use serde::{Deserialize, Serialize};

/// Named easing curve, selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// `1 - (1-t)^3`
    #[default]
    CubicOut,
    /// `1 - (1-t)^4`
    QuarticOut,
    /// `1 - (1-t)^5`
    QuinticOut,
    /// `1 - 2^(-10t)`, snapped to 1 at the end
    ExpoOut,
    EaseInOutCubic,
}

impl Easing {
    pub const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::CubicOut,
        Easing::QuarticOut,
        Easing::QuinticOut,
        Easing::ExpoOut,
        Easing::EaseInOutCubic,
    ];

    /// Apply the easing function to a progress value
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => linear(t),
            Easing::CubicOut => cubic_out(t),
            Easing::QuarticOut => quartic_out(t),
            Easing::QuinticOut => quintic_out(t),
            Easing::ExpoOut => expo_out(t),
            Easing::EaseInOutCubic => ease_in_out_cubic(t),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::CubicOut => "cubic-out",
            Easing::QuarticOut => "quartic-out",
            Easing::QuinticOut => "quintic-out",
            Easing::ExpoOut => "expo-out",
            Easing::EaseInOutCubic => "ease-in-out-cubic",
        }
    }
}

#[inline]
pub fn linear(t: f64) -> f64 {
    t
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
pub fn cubic_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quartic ease-out: f(t) = 1 - (1-t)⁴
#[inline]
pub fn quartic_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
pub fn quintic_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
pub fn expo_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_boundaries() {
        for easing in Easing::ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at t=0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in Easing::ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let t = i as f64 / 100.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(Easing::CubicOut.apply(-0.5), 0.0);
        assert_eq!(Easing::QuarticOut.apply(7.0), 1.0);
    }

    #[test]
    fn test_known_points() {
        assert_eq!(cubic_out(0.5), 0.875);
        assert_eq!(quartic_out(0.5), 0.9375);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Easing::QuarticOut).unwrap();
        assert_eq!(json, "\"quartic-out\"");
        let parsed: Easing = serde_json::from_str("\"ease-in-out-cubic\"").unwrap();
        assert_eq!(parsed, Easing::EaseInOutCubic);
        assert_eq!(parsed.name(), "ease-in-out-cubic");
    }
}
