//! Progressive value animator
//!
//! One `ValueAnimation` is one run: it owns its target value and is advanced
//! by calling [`ValueAnimation::tick`] with the frame timestamp. Once a run
//! reports [`RunStatus::Done`] it is terminal; a remount builds a new run.

use std::time::Duration;

use super::easing::Easing;
use super::timing::{lerp, phase, Phase};

/// Lifecycle of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Inside the start delay; value is still the start value
    Pending,
    /// Advancing toward the target
    Running,
    /// Reached the target; no further frames needed
    Done,
}

/// A named numeric value with its start, target and live state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedValue {
    pub start: f64,
    pub target: f64,
    pub current: f64,
}

impl AnimatedValue {
    pub fn new(start: f64, target: f64) -> Self {
        Self {
            start,
            target,
            current: start,
        }
    }
}

/// Value emitted by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub status: RunStatus,
}

impl Sample {
    /// Integer shown by counters
    pub fn rounded(&self) -> i64 {
        self.value.round() as i64
    }

    pub fn is_done(&self) -> bool {
        self.status == RunStatus::Done
    }
}

/// Fixed-duration eased animation of one value
#[derive(Debug, Clone)]
pub struct ValueAnimation {
    value: AnimatedValue,
    started_at: Duration,
    delay: Duration,
    duration: Duration,
    easing: Easing,
    status: RunStatus,
}

impl ValueAnimation {
    /// Create a run from `start` to `target` starting at timestamp zero
    pub fn new(start: f64, target: f64, duration: Duration) -> Self {
        Self {
            value: AnimatedValue::new(start, target),
            started_at: Duration::ZERO,
            delay: Duration::ZERO,
            duration,
            easing: Easing::default(),
            status: RunStatus::Pending,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Anchor the run at the timestamp it was triggered
    pub fn starting_at(mut self, started_at: Duration) -> Self {
        self.started_at = started_at;
        self
    }

    /// Advance the run to `now` and return the emitted value
    pub fn tick(&mut self, now: Duration) -> Sample {
        if self.status != RunStatus::Done {
            // A tick ahead of the trigger time is still waiting
            let current = match now.checked_sub(self.started_at) {
                Some(elapsed) => phase(elapsed, self.delay, self.duration),
                None => Phase::Waiting,
            };
            match current {
                Phase::Waiting => {
                    self.value.current = self.value.start;
                    self.status = RunStatus::Pending;
                }
                Phase::Active(t) => {
                    let eased = self.easing.apply(t);
                    self.value.current = lerp(self.value.start, self.value.target, eased);
                    self.status = RunStatus::Running;
                }
                Phase::Finished => {
                    // Exact target, never left to floating-point drift
                    self.value.current = self.value.target;
                    self.status = RunStatus::Done;
                }
            }
        }
        self.sample()
    }

    /// Restart from the current value toward a new target
    pub fn retarget(&mut self, now: Duration, target: f64) {
        let current = self.value.current;
        self.value = AnimatedValue::new(current, target);
        self.started_at = now;
        self.delay = Duration::ZERO;
        self.status = RunStatus::Pending;
    }

    pub fn sample(&self) -> Sample {
        Sample {
            value: self.value.current,
            status: self.status,
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value.current
    }

    pub fn animated_value(&self) -> AnimatedValue {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.value.target
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_done(&self) -> bool {
        self.status == RunStatus::Done
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    /// Timestamp at which the run reaches its target
    pub fn finishes_at(&self) -> Duration {
        self.started_at + self.delay + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_cubic_counter_midpoint() {
        let mut run = ValueAnimation::new(0.0, 92.0, ms(1500)).with_easing(Easing::CubicOut);

        let sample = run.tick(ms(750));
        assert_eq!(sample.status, RunStatus::Running);
        assert!((sample.value - 80.5).abs() < 1e-9);
        assert_eq!(sample.rounded(), 81);
    }

    #[test]
    fn test_start_at_delay_and_exact_target_at_end() {
        for easing in Easing::ALL {
            let mut run = ValueAnimation::new(3.0, 47.3, ms(800))
                .with_delay(ms(250))
                .with_easing(easing)
                .starting_at(ms(1000));

            assert_eq!(run.tick(ms(1250)).value, 3.0, "{:?}", easing);
            let last = run.tick(ms(2050));
            assert_eq!(last.value, 47.3, "{:?}", easing);
            assert!(last.is_done());

            // Terminal: later ticks never move it again
            assert_eq!(run.tick(ms(9000)).value, 47.3);
        }
    }

    #[test]
    fn test_nothing_moves_before_delay() {
        let mut run = ValueAnimation::new(10.0, 90.0, ms(500)).with_delay(ms(400));
        for t in (0..400).step_by(16) {
            let sample = run.tick(ms(t));
            assert_eq!(sample.value, 10.0);
            assert_eq!(sample.status, RunStatus::Pending);
        }
    }

    #[test]
    fn test_equal_start_and_target_is_constant() {
        let mut run = ValueAnimation::new(42.0, 42.0, ms(1000));
        for t in (0..=1200).step_by(16) {
            assert_eq!(run.tick(ms(t)).value, 42.0);
        }
        assert!(run.is_done());
    }

    #[test]
    fn test_monotonic_in_both_directions() {
        for easing in Easing::ALL {
            let mut up = ValueAnimation::new(0.0, 100.0, ms(1000)).with_easing(easing);
            let mut down = ValueAnimation::new(100.0, 0.0, ms(1000)).with_easing(easing);
            let mut prev_up = f64::MIN;
            let mut prev_down = f64::MAX;
            for t in (0..=1100).step_by(7) {
                let u = up.tick(ms(t)).value;
                let d = down.tick(ms(t)).value;
                assert!(u >= prev_up, "{:?} rising run went back at {}ms", easing, t);
                assert!(d <= prev_down, "{:?} falling run went back at {}ms", easing, t);
                assert!((0.0..=100.0).contains(&u));
                assert!((0.0..=100.0).contains(&d));
                prev_up = u;
                prev_down = d;
            }
        }
    }

    #[test]
    fn test_zero_duration_emits_target_on_next_tick() {
        let mut run = ValueAnimation::new(0.0, 7.0, Duration::ZERO);
        let sample = run.tick(ms(0));
        assert_eq!(sample.value, 7.0);
        assert!(sample.is_done());
    }

    #[test]
    fn test_tick_before_trigger_time_waits() {
        let mut run = ValueAnimation::new(0.0, 1.0, ms(100)).starting_at(ms(500));
        let sample = run.tick(ms(100));
        assert_eq!(sample.status, RunStatus::Pending);
        assert_eq!(sample.value, 0.0);
        assert_eq!(run.tick(ms(500)).status, RunStatus::Running);
        assert!(run.tick(ms(600)).is_done());
    }

    #[test]
    fn test_retarget_continues_from_current_value() {
        let mut run = ValueAnimation::new(0.0, 100.0, ms(1000)).with_easing(Easing::Linear);
        run.tick(ms(500));
        assert!((run.value() - 50.0).abs() < 1e-9);

        run.retarget(ms(500), 20.0);
        assert_eq!(run.tick(ms(500)).value, 50.0);
        let done = run.tick(ms(1500));
        assert_eq!(done.value, 20.0);
        assert!(done.is_done());
    }

    #[test]
    fn test_finishes_at() {
        let run = ValueAnimation::new(0.0, 1.0, ms(800))
            .with_delay(ms(600))
            .starting_at(ms(100));
        assert_eq!(run.finishes_at(), ms(1500));
    }
}
