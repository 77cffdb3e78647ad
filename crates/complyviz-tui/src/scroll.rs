//! Smooth page scrolling for the dashboard
//!
//! The tween itself is a core [`ValueAnimation`]; this controller adds delta
//! batching, clamping and the instant-jump fallback when smooth scrolling is
//! turned off.

use std::time::Duration;

use complyviz_core::animation::ValueAnimation;
use complyviz_core::ScrollConfig;

/// Scroll animation controller
///
/// Call `scroll_by()` on input, then `update()` every frame with the current
/// clock time to get the interpolated scroll offset.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ValueAnimation>,
    config: ScrollConfig,
    current_scroll: u16,
    /// Pending scroll delta for batching multiple scroll events
    pending_delta: i32,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current_scroll: 0,
            pending_delta: 0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Check if there's pending work (animation or pending delta)
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Final position after the running animation
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.target().round() as u16)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Set scroll position immediately (no animation)
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0;
    }

    /// Scroll by a delta amount (positive = down, negative = up)
    ///
    /// Deltas arriving between two updates are summed into one animation.
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.config.is_smooth() {
            self.current_scroll = clamp_scroll(i32::from(self.current_scroll) + delta, max_scroll);
            self.animation = None;
            return;
        }
        self.pending_delta += delta;
    }

    pub fn scroll_down(&mut self, max_scroll: u16) {
        self.scroll_by(i32::from(self.config.scroll_lines.max(1)), max_scroll);
    }

    pub fn scroll_up(&mut self, max_scroll: u16) {
        self.scroll_by(-i32::from(self.config.scroll_lines.max(1)), max_scroll);
    }

    pub fn scroll_half_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        let half_page = i32::from((viewport_height / 2).max(1));
        self.scroll_by(half_page, max_scroll);
    }

    pub fn scroll_half_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        let half_page = i32::from((viewport_height / 2).max(1));
        self.scroll_by(-half_page, max_scroll);
    }

    /// Animate to an absolute position
    pub fn scroll_to(&mut self, now: Duration, target: u16, max_scroll: u16) {
        self.pending_delta = 0;
        self.start(now, target.min(max_scroll));
    }

    fn start(&mut self, now: Duration, target: u16) {
        if !self.config.is_smooth() {
            self.current_scroll = target;
            self.animation = None;
            return;
        }
        if target == self.current_scroll {
            self.animation = None;
            return;
        }
        self.animation = Some(
            ValueAnimation::new(
                f64::from(self.current_scroll),
                f64::from(target),
                self.config.animation_duration(),
            )
            .with_easing(self.config.easing)
            .starting_at(now),
        );
    }

    /// Advance to `now` and return the current scroll position
    pub fn update(&mut self, now: Duration, max_scroll: u16) -> u16 {
        if self.pending_delta != 0 {
            let target = clamp_scroll(i32::from(self.target_scroll()) + self.pending_delta, max_scroll);
            self.pending_delta = 0;
            self.start(now, target);
        }

        if let Some(animation) = self.animation.as_mut() {
            let sample = animation.tick(now);
            self.current_scroll = (sample.value.round().max(0.0) as u16).min(max_scroll);
            if sample.is_done() {
                self.animation = None;
            }
        }
        self.current_scroll = self.current_scroll.min(max_scroll);
        self.current_scroll
    }

    /// Cancel any active animation and stop at current position
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0;
    }
}

fn clamp_scroll(value: i32, max_scroll: u16) -> u16 {
    value.clamp(0, i32::from(max_scroll)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn smooth(duration_ms: u64) -> ScrollConfig {
        ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: duration_ms,
            ..Default::default()
        }
    }

    #[test]
    fn test_instant_scroll_when_disabled() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        animator.scroll_to(ms(0), 100, 200);
        assert_eq!(animator.current_scroll(), 100);
        assert!(!animator.is_animating());

        animator.scroll_by(500, 200);
        assert_eq!(animator.current_scroll(), 200);
    }

    #[test]
    fn test_animation_reaches_target() {
        let mut animator = ScrollAnimator::new(smooth(100));
        animator.scroll_to(ms(0), 100, 200);
        assert!(animator.is_animating());
        assert_eq!(animator.target_scroll(), 100);

        let mid = animator.update(ms(50), 200);
        assert!(mid > 0 && mid < 100);
        assert_eq!(animator.update(ms(100), 200), 100);
        assert!(!animator.needs_update());
    }

    #[test]
    fn test_scroll_by_batching() {
        let mut animator = ScrollAnimator::new(smooth(100));

        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        assert!(animator.needs_update());

        animator.update(ms(0), 200);
        assert_eq!(animator.target_scroll(), 30);
    }

    #[test]
    fn test_chained_deltas_extend_the_target() {
        let mut animator = ScrollAnimator::new(smooth(100));
        animator.scroll_by(10, 200);
        animator.update(ms(0), 200);
        animator.scroll_by(10, 200);
        animator.update(ms(20), 200);
        assert_eq!(animator.target_scroll(), 20);
    }

    #[test]
    fn test_scroll_clamp_max() {
        let mut animator = ScrollAnimator::default();
        animator.set_scroll(50);
        animator.scroll_to(ms(0), 300, 100);
        animator.update(ms(1_000), 100);
        assert_eq!(animator.current_scroll(), 100);

        animator.scroll_by(-500, 100);
        animator.update(ms(1_000), 100);
        assert_eq!(animator.target_scroll(), 0);
    }
}
