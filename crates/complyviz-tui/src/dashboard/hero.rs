//! Decorative particle field behind the hero banner
//!
//! Every particle is a continuous lerp mount chasing a target that jumps to a
//! new spot every `RETARGET_EVERY`. The field only holds frame registrations
//! while the banner is on screen; scrolling back remounts it from scratch.

use std::time::Duration;

use complyviz_core::animation::{ContinuousMount, FrameLoop, Lerp2};
use tracing::debug;

pub const PARTICLE_COUNT: usize = 14;
const LERP_RATE: f64 = 0.06;
const RETARGET_EVERY: Duration = Duration::from_millis(1800);

/// Small xorshift generator; the field only needs scatter, not randomness
#[derive(Debug, Clone)]
struct Scatter(u64);

impl Scatter {
    fn next_unit(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[derive(Debug)]
pub struct Hero {
    particles: Vec<ContinuousMount>,
    scatter: Scatter,
    last_retarget: Option<Duration>,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            particles: Vec::new(),
            scatter: Scatter(0x9e37_79b9_7f4a_7c15),
            last_retarget: None,
        }
    }
}

impl Hero {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        !self.particles.is_empty()
    }

    /// Mount or unmount the field to match banner visibility
    pub fn sync(&mut self, visible: bool, frames: &mut FrameLoop) {
        match (visible, self.is_mounted()) {
            (true, false) => self.mount(frames),
            (false, true) => self.unmount(frames),
            _ => {}
        }
    }

    fn mount(&mut self, frames: &mut FrameLoop) {
        self.last_retarget = None;
        for _ in 0..PARTICLE_COUNT {
            let x = self.scatter.next_unit();
            let y = self.scatter.next_unit();
            match Lerp2::new(x, y, LERP_RATE) {
                Ok(lerp) => self.particles.push(ContinuousMount::start(lerp, frames)),
                Err(e) => {
                    tracing::warn!(error = %e, "Hero particle not mounted");
                    return;
                }
            }
        }
        debug!(count = self.particles.len(), "Hero particles mounted");
    }

    /// Tear down every particle; no callback runs afterwards
    pub fn unmount(&mut self, frames: &mut FrameLoop) {
        for particle in &mut self.particles {
            particle.teardown(frames);
        }
        self.particles.clear();
        debug!("Hero particles unmounted");
    }

    /// Move particle targets when due
    pub fn drift(&mut self, now: Duration) {
        if self.particles.is_empty() {
            return;
        }
        let due = self
            .last_retarget
            .map_or(true, |last| now.saturating_sub(last) >= RETARGET_EVERY);
        if !due {
            return;
        }
        for particle in &self.particles {
            let x = self.scatter.next_unit();
            let y = self.scatter.next_unit();
            particle.retarget(x, y);
        }
        self.last_retarget = Some(now);
    }

    /// Current particle positions in the unit square
    pub fn positions(&self) -> Vec<(f64, f64)> {
        self.particles.iter().map(ContinuousMount::current).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_scatter_stays_in_unit_range() {
        let mut scatter = Scatter(42);
        for _ in 0..1000 {
            let v = scatter.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_mount_registers_one_frame_per_particle() {
        let mut frames = FrameLoop::new();
        let mut hero = Hero::new();

        hero.sync(true, &mut frames);
        assert_eq!(frames.pending_count(), PARTICLE_COUNT);
        hero.sync(true, &mut frames);
        assert_eq!(frames.pending_count(), PARTICLE_COUNT);

        hero.sync(false, &mut frames);
        assert!(!frames.has_pending());
        assert!(hero.positions().is_empty());
    }

    #[test]
    fn test_particles_move_toward_new_targets() {
        let mut frames = FrameLoop::new();
        let mut hero = Hero::new();
        hero.sync(true, &mut frames);

        let before = hero.positions();
        hero.drift(ms(0));
        for i in 0..10 {
            frames.run_frame(ms(i * 16));
        }
        let after = hero.positions();
        assert!(before.iter().zip(after.iter()).any(|(a, b)| a != b));
        assert!(after.iter().all(|&(x, y)| (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y)));
    }
}
