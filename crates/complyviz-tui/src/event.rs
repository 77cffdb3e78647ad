use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    frame_interval: Duration,
}

/// Result of an async live-data fetch
pub enum LiveDataResult {
    /// Assessment progress loaded from the backend
    Success {
        completion: f64,
        user: Option<String>,
    },
    /// Fetch failed; the dashboard keeps its demo data
    Failure {
        error: String,
    },
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    /// Poll at `tick_rate_ms` when idle and at `fps` while animating
    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
            frame_interval: Duration::from_millis(1000 / u64::from(fps.max(1))),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll with the animation frame interval
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.frame_interval)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval_from_fps() {
        let handler = EventHandler::with_animation_fps(100, 60);
        assert_eq!(handler.tick_rate(), Duration::from_millis(100));
        assert_eq!(handler.frame_interval(), Duration::from_millis(16));

        let handler = EventHandler::with_animation_fps(0, 0);
        assert_eq!(handler.tick_rate(), Duration::from_millis(1));
        assert_eq!(handler.frame_interval(), Duration::from_millis(1000));
    }
}
