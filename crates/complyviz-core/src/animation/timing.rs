//! Time calculation utilities for value animations
//!
//! Timestamps are `Duration`s measured from an arbitrary clock origin, the
//! same way a browser frame callback receives milliseconds since page load.

use std::time::Duration;

/// Where a run stands at a given elapsed time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Still inside the start delay
    Waiting,
    /// Advancing with the given linear progress in [0, 1)
    Active(f64),
    /// Progress reached 1
    Finished,
}

/// Calculate the phase of a run from elapsed time, delay and duration
///
/// A zero duration finishes on the first call at or after `delay` instead of
/// dividing by zero.
#[inline]
pub fn phase(elapsed: Duration, delay: Duration, duration: Duration) -> Phase {
    if elapsed < delay {
        return Phase::Waiting;
    }
    if duration.is_zero() {
        return Phase::Finished;
    }
    let ratio = (elapsed - delay).as_secs_f64() / duration.as_secs_f64();
    if ratio >= 1.0 {
        Phase::Finished
    } else {
        Phase::Active(ratio.clamp(0.0, 1.0))
    }
}

/// Linear progress clamped to [0, 1]
#[inline]
pub fn progress(elapsed: Duration, delay: Duration, duration: Duration) -> f64 {
    match phase(elapsed, delay, duration) {
        Phase::Waiting => 0.0,
        Phase::Active(t) => t,
        Phase::Finished => 1.0,
    }
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for u16 values (scroll positions)
#[inline]
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(f64::from(from), f64::from(to), t).round() as u16
}
