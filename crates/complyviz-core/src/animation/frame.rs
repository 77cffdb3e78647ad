//! Cooperative frame scheduling
//!
//! The equivalent of `requestAnimationFrame`: a callback is registered for the
//! next frame and, when invoked with the frame timestamp, either asks for one
//! more frame or stops. Nothing blocks; the host decides when frames happen.

use std::fmt;
use std::time::Duration;

use tracing::debug;

/// What a frame callback wants after running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// Run again on the next frame
    Again,
    /// Registration ends
    Stop,
}

/// Identifies one registration across frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

pub type FrameCallback = Box<dyn FnMut(Duration) -> FrameRequest>;

/// Capability to schedule per-frame work
pub trait FrameScheduler {
    /// Register `callback` for the next frame
    fn request_frame(&mut self, callback: FrameCallback) -> FrameHandle;

    /// Drop a registration; returns false when it had already ended
    fn cancel(&mut self, handle: FrameHandle) -> bool;
}

/// Deterministic scheduler pumped by the host with explicit timestamps
#[derive(Default)]
pub struct FrameLoop {
    next_id: u64,
    pending: Vec<(FrameHandle, FrameCallback)>,
    frames_run: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke every pending callback once with `now`
    ///
    /// Returns the number of callbacks that ran.
    pub fn run_frame(&mut self, now: Duration) -> usize {
        let due = std::mem::take(&mut self.pending);
        let ran = due.len();
        for (handle, mut callback) in due {
            match callback(now) {
                FrameRequest::Again => self.pending.push((handle, callback)),
                FrameRequest::Stop => debug!(handle = handle.0, "Frame registration finished"),
            }
        }
        self.frames_run += 1;
        ran
    }

    /// Whether any registration wants another frame
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.iter().any(|(h, _)| *h == handle)
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }
}

impl FrameScheduler for FrameLoop {
    fn request_frame(&mut self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.push((handle, callback));
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(h, _)| *h != handle);
        let removed = self.pending.len() != before;
        if removed {
            debug!(handle = handle.0, "Frame registration cancelled");
        }
        removed
    }
}

impl fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameLoop")
            .field("next_id", &self.next_id)
            .field("pending", &self.pending.len())
            .field("frames_run", &self.frames_run)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_callback_runs_until_stop() {
        let mut frames = FrameLoop::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let handle = frames.request_frame(Box::new(move |_| {
            counter.set(counter.get() + 1);
            if counter.get() < 3 {
                FrameRequest::Again
            } else {
                FrameRequest::Stop
            }
        }));

        assert!(frames.is_pending(handle));
        for i in 0..10 {
            frames.run_frame(Duration::from_millis(i * 16));
        }
        assert_eq!(calls.get(), 3);
        assert!(!frames.has_pending());
        assert_eq!(frames.frames_run(), 10);
    }

    #[test]
    fn test_cancel_stops_future_frames() {
        let mut frames = FrameLoop::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let handle = frames.request_frame(Box::new(move |_| {
            counter.set(counter.get() + 1);
            FrameRequest::Again
        }));

        frames.run_frame(Duration::ZERO);
        frames.run_frame(Duration::from_millis(16));
        assert!(frames.cancel(handle));
        assert!(!frames.cancel(handle));
        frames.run_frame(Duration::from_millis(32));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_callbacks_receive_frame_timestamp() {
        let mut frames = FrameLoop::new();
        let seen = Rc::new(Cell::new(Duration::ZERO));
        let slot = Rc::clone(&seen);
        frames.request_frame(Box::new(move |now| {
            slot.set(now);
            FrameRequest::Stop
        }));
        assert_eq!(frames.run_frame(Duration::from_millis(40)), 1);
        assert_eq!(seen.get(), Duration::from_millis(40));
        assert_eq!(frames.run_frame(Duration::from_millis(56)), 0);
    }
}
