//! Scroll-triggered mounts
//!
//! A [`ScrollTrigger`] ties one visibility detector to one sequencer and at
//! most one frame registration. The frame callback and the renderer share the
//! sequencer through `Rc<RefCell<_>>`; they never overlap because frames and
//! draws alternate on the same thread.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use super::frame::{FrameHandle, FrameRequest, FrameScheduler};
use super::lerp::Lerp2;
use super::sequencer::Sequencer;
use super::visibility::{LayoutRect, VisibilityDetector};

/// One mounted, scroll-triggered widget animation
#[derive(Debug)]
pub struct ScrollTrigger {
    detector: VisibilityDetector,
    template: Sequencer,
    sequencer: Rc<RefCell<Sequencer>>,
    handle: Option<FrameHandle>,
    mounted: Rc<Cell<bool>>,
    ticks: Rc<Cell<u64>>,
}

impl ScrollTrigger {
    pub fn new(detector: VisibilityDetector, sequencer: Sequencer) -> Self {
        Self {
            detector,
            sequencer: Rc::new(RefCell::new(sequencer.clone())),
            template: sequencer,
            handle: None,
            mounted: Rc::new(Cell::new(true)),
            ticks: Rc::new(Cell::new(0)),
        }
    }

    /// Feed the latest layout; starts the animation on the first observation
    /// that makes the element visible. Returns true when it started.
    pub fn observe<S: FrameScheduler>(
        &mut self,
        element: Option<LayoutRect>,
        viewport: LayoutRect,
        now: Duration,
        scheduler: &mut S,
    ) -> bool {
        if !self.mounted.get() {
            return false;
        }
        if self.detector.observe(element, viewport) {
            self.trigger(now, scheduler);
            return true;
        }
        false
    }

    /// Start a fresh run at `now`
    ///
    /// A run still in flight is cancelled first, so one mount never has two
    /// registrations.
    pub fn trigger<S: FrameScheduler>(&mut self, now: Duration, scheduler: &mut S) {
        if !self.mounted.get() {
            return;
        }
        if let Some(stale) = self.handle.take() {
            if scheduler.cancel(stale) {
                debug!("Cancelled stale animation run before retrigger");
            }
        }

        let mut fresh = self.template.clone();
        fresh.start(now);
        *self.sequencer.borrow_mut() = fresh;

        let sequencer = Rc::clone(&self.sequencer);
        let mounted = Rc::clone(&self.mounted);
        let ticks = Rc::clone(&self.ticks);
        let handle = scheduler.request_frame(Box::new(move |frame_time| {
            if !mounted.get() {
                return FrameRequest::Stop;
            }
            ticks.set(ticks.get() + 1);
            let mut sequencer = sequencer.borrow_mut();
            sequencer.tick(frame_time);
            if sequencer.needs_frame() {
                FrameRequest::Again
            } else {
                FrameRequest::Stop
            }
        }));
        self.handle = Some(handle);
    }

    /// Unmount: cancel the registration; no callback runs afterwards
    pub fn teardown<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        self.mounted.set(false);
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
        }
    }

    /// Live animation state, readable during render
    pub fn sequencer(&self) -> Ref<'_, Sequencer> {
        self.sequencer.borrow()
    }

    pub fn is_visible(&self) -> bool {
        self.detector.is_visible()
    }

    pub fn is_animating(&self) -> bool {
        self.mounted.get() && self.sequencer.borrow().needs_frame()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Number of frame callbacks that did work for this mount
    pub fn tick_count(&self) -> u64 {
        self.ticks.get()
    }
}

impl Drop for ScrollTrigger {
    fn drop(&mut self) {
        // A registration left behind stops on its next invocation
        self.mounted.set(false);
    }
}

/// Unbounded per-frame lerp, e.g. decorative particles following a target
#[derive(Debug)]
pub struct ContinuousMount {
    position: Rc<RefCell<Lerp2>>,
    handle: Option<FrameHandle>,
    mounted: Rc<Cell<bool>>,
}

impl ContinuousMount {
    pub fn start<S: FrameScheduler>(lerp: Lerp2, scheduler: &mut S) -> Self {
        let position = Rc::new(RefCell::new(lerp));
        let mounted = Rc::new(Cell::new(true));

        let shared = Rc::clone(&position);
        let alive = Rc::clone(&mounted);
        let handle = scheduler.request_frame(Box::new(move |_| {
            if !alive.get() {
                return FrameRequest::Stop;
            }
            shared.borrow_mut().step();
            FrameRequest::Again
        }));

        Self {
            position,
            handle: Some(handle),
            mounted,
        }
    }

    pub fn retarget(&self, x: f64, y: f64) {
        self.position.borrow_mut().retarget(x, y);
    }

    pub fn current(&self) -> (f64, f64) {
        self.position.borrow().current()
    }

    pub fn teardown<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        self.mounted.set(false);
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
        }
    }
}

impl Drop for ContinuousMount {
    fn drop(&mut self) {
        self.mounted.set(false);
    }
}
