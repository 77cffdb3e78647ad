//! Continuous fixed-rate approach toward a moving target
//!
//! Used by decorative scenes that follow a target for as long as they are
//! mounted. A `Lerp` never completes; it is stepped once per frame until the
//! owner tears it down.

use crate::{Error, Result};

/// Per-frame exponential smoothing toward `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lerp {
    current: f64,
    target: f64,
    rate: f64,
}

impl Lerp {
    /// `rate` is the fraction of the remaining distance covered per frame and
    /// must lie in (0, 1)
    pub fn new(initial: f64, rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 || rate >= 1.0 {
            return Err(Error::Animation(format!(
                "lerp rate must be within (0, 1), got {}",
                rate
            )));
        }
        if !initial.is_finite() {
            return Err(Error::Animation("lerp initial value must be finite".to_string()));
        }
        Ok(Self {
            current: initial,
            target: initial,
            rate,
        })
    }

    /// Move the target; the current value keeps approaching from where it is
    pub fn retarget(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump to a value without easing
    pub fn set_immediate(&mut self, value: f64) {
        self.current = value;
        self.target = value;
    }

    /// Advance one frame and return the new current value
    #[inline]
    pub fn step(&mut self) -> f64 {
        self.current += (self.target - self.current) * self.rate;
        self.current
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Whether the remaining distance is below `epsilon`
    pub fn is_settled(&self, epsilon: f64) -> bool {
        (self.target - self.current).abs() < epsilon
    }
}

/// Two-axis lerp for pointer-following scene elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lerp2 {
    pub x: Lerp,
    pub y: Lerp,
}

impl Lerp2 {
    pub fn new(x: f64, y: f64, rate: f64) -> Result<Self> {
        Ok(Self {
            x: Lerp::new(x, rate)?,
            y: Lerp::new(y, rate)?,
        })
    }

    pub fn retarget(&mut self, x: f64, y: f64) {
        self.x.retarget(x);
        self.y.retarget(y);
    }

    pub fn step(&mut self) -> (f64, f64) {
        (self.x.step(), self.y.step())
    }

    pub fn current(&self) -> (f64, f64) {
        (self.x.current(), self.y.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_bounds() {
        assert!(Lerp::new(0.0, 0.0).is_err());
        assert!(Lerp::new(0.0, 1.0).is_err());
        assert!(Lerp::new(0.0, f64::NAN).is_err());
        assert!(Lerp::new(f64::INFINITY, 0.1).is_err());
        assert!(Lerp::new(0.0, 0.02).is_ok());
    }

    #[test]
    fn test_step_covers_fixed_fraction() {
        let mut lerp = Lerp::new(0.0, 0.1).unwrap();
        lerp.retarget(100.0);
        assert!((lerp.step() - 10.0).abs() < 1e-9);
        assert!((lerp.step() - 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_approaches_but_keeps_running() {
        let mut lerp = Lerp::new(0.0, 0.05).unwrap();
        lerp.retarget(1.0);
        let mut prev = 0.0;
        for _ in 0..200 {
            let v = lerp.step();
            assert!(v > prev && v < 1.0);
            prev = v;
        }
        assert!(lerp.is_settled(0.001));

        // A moved target is followed from the current position
        lerp.retarget(-1.0);
        let v = lerp.step();
        assert!(v < prev);
    }

    #[test]
    fn test_lerp2_follows_both_axes() {
        let mut pos = Lerp2::new(0.0, 0.0, 0.5).unwrap();
        pos.retarget(10.0, -4.0);
        assert_eq!(pos.step(), (5.0, -2.0));
        assert_eq!(pos.current(), (5.0, -2.0));
    }
}
