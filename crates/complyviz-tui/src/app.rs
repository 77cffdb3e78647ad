use std::time::Duration;

use complyviz_core::animation::{Easing, FrameLoop, ValueAnimation};
use complyviz_core::{AppConfig, Result};
use tracing::{debug, info};

use crate::dashboard::Dashboard;
use crate::event::LiveDataResult;
use crate::input::Action;
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;
use crate::themes::{available_themes, load_theme};

const COMPLETION_DURATION: Duration = Duration::from_millis(1200);

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Dashboard application state
///
/// Time never comes from a wall clock in here; the caller passes `now` so the
/// whole app can be driven frame by frame in tests.
pub struct App {
    pub dashboard: Dashboard,
    pub frames: FrameLoop,
    pub scroll: ScrollAnimator,
    pub theme: Theme,
    pub theme_name: String,
    pub mode: Mode,
    /// Width and height of the page viewport
    pub viewport: (u16, u16),
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'g' for 'gg')
    pub pending_key: Option<char>,
    pub user: Option<String>,
    completion: Option<ValueAnimation>,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            dashboard: Dashboard::demo(&config.animation)?,
            frames: FrameLoop::new(),
            scroll: ScrollAnimator::new(config.ui.scroll.clone()),
            theme: load_theme(&config.ui.theme),
            theme_name: config.ui.theme.clone(),
            mode: Mode::Normal,
            viewport: (80, 24),
            should_quit: false,
            status_message: None,
            pending_key: None,
            user: None,
            completion: None,
        })
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    pub fn max_scroll(&self) -> u16 {
        self.dashboard.page_height().saturating_sub(self.viewport.1)
    }

    pub fn scroll_position(&self) -> u16 {
        self.scroll.current_scroll()
    }

    /// Advance everything to `now`: scroll tween, visibility, frame callbacks
    pub fn frame(&mut self, now: Duration) {
        let max_scroll = self.max_scroll();
        let scroll = self.scroll.update(now, max_scroll);
        self.dashboard
            .observe(scroll, self.viewport, now, &mut self.frames);
        self.dashboard.drift(now);
        self.frames.run_frame(now);
        if let Some(completion) = self.completion.as_mut() {
            completion.tick(now);
        }
    }

    /// Whether the next poll should use the animation frame interval
    pub fn needs_animation_frame(&self) -> bool {
        self.frames.has_pending()
            || self.scroll.needs_update()
            || self.completion.as_ref().is_some_and(|c| !c.is_done())
    }

    /// Animated assessment completion, once live data has arrived
    pub fn completion(&self) -> Option<f64> {
        self.completion.as_ref().map(ValueAnimation::value)
    }

    /// Breadcrumb trail for the header
    pub fn crumbs(&self) -> Vec<&str> {
        let mut crumbs = vec!["Home", "Dashboard"];
        if let Some(section) = self
            .dashboard
            .section_at(self.scroll.current_scroll(), self.viewport.1)
        {
            crumbs.push(section);
        }
        crumbs
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    pub fn apply(&mut self, action: Action, now: Duration) {
        if action != Action::PendingG {
            self.clear_pending_key();
        }
        if action != Action::None {
            self.clear_status();
        }

        let max_scroll = self.max_scroll();
        let page = self.viewport.1.max(1);
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll.scroll_down(max_scroll),
            Action::ScrollUp => self.scroll.scroll_up(max_scroll),
            Action::ScrollHalfPageDown => self.scroll.scroll_half_page_down(page, max_scroll),
            Action::ScrollHalfPageUp => self.scroll.scroll_half_page_up(page, max_scroll),
            Action::ScrollPageDown => self.scroll.scroll_by(i32::from(page), max_scroll),
            Action::ScrollPageUp => self.scroll.scroll_by(-i32::from(page), max_scroll),
            Action::JumpToTop => self.scroll.scroll_to(now, 0, max_scroll),
            Action::JumpToBottom => self.scroll.scroll_to(now, max_scroll, max_scroll),
            Action::PendingG => self.pending_key = Some('g'),
            Action::Replay => {
                let restarted = self.dashboard.replay(now, &mut self.frames);
                self.set_status(format!("Replaying {} panel(s)", restarted));
            }
            Action::CycleTheme => self.cycle_theme(),
            Action::ShowHelp => self.mode = Mode::Help,
            Action::ExitMode => self.mode = Mode::Normal,
            Action::None => {}
        }
    }

    fn cycle_theme(&mut self) {
        let themes = available_themes();
        let index = themes
            .iter()
            .position(|name| *name == self.theme_name)
            .map_or(0, |i| (i + 1) % themes.len());
        self.theme_name = themes[index].to_string();
        self.theme = load_theme(&self.theme_name);
        debug!(theme = %self.theme_name, "Theme changed");
        self.set_status(format!("Theme: {}", self.theme_name));
    }

    /// Fold in the result of a background fetch
    pub fn apply_live(&mut self, result: LiveDataResult, now: Duration) {
        match result {
            LiveDataResult::Success { completion, user } => {
                info!(completion, "Live assessment data loaded");
                let start = self.completion().unwrap_or(0.0);
                self.completion = Some(
                    ValueAnimation::new(start, completion, COMPLETION_DURATION)
                        .with_easing(Easing::CubicOut)
                        .starting_at(now),
                );
                self.user = user;
            }
            LiveDataResult::Failure { error } => {
                self.set_status(format!("Offline: {}", error));
            }
        }
    }

    /// Unmount every animation; no frame callback runs afterwards
    pub fn shutdown(&mut self) {
        self.dashboard.teardown(&mut self.frames);
        self.completion = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn app() -> App {
        App::new(&AppConfig::default()).unwrap()
    }

    #[test]
    fn test_first_frame_starts_visible_panels() {
        let mut app = app();
        assert!(!app.needs_animation_frame());
        app.frame(ms(0));
        assert!(app.needs_animation_frame());
        assert!(app
            .dashboard
            .panel("frameworks")
            .unwrap()
            .trigger()
            .is_visible());
    }

    #[test]
    fn test_jump_to_bottom_reveals_last_panel() {
        let mut app = app();
        app.frame(ms(0));
        app.apply(Action::JumpToBottom, ms(10));

        let mut t = 10;
        loop {
            t += 16;
            app.frame(ms(t));
            if !app.scroll.needs_update() || t > 5000 {
                break;
            }
        }
        assert_eq!(app.scroll_position(), app.max_scroll());
        assert!(app
            .dashboard
            .panel("response")
            .unwrap()
            .trigger()
            .is_visible());
        assert_eq!(app.crumbs().len(), 3);
    }

    #[test]
    fn test_pending_g_clears_on_other_action() {
        let mut app = app();
        app.apply(Action::PendingG, ms(0));
        assert_eq!(app.pending_key, Some('g'));
        app.apply(Action::ScrollDown, ms(0));
        assert_eq!(app.pending_key, None);
    }

    #[test]
    fn test_cycle_theme_wraps() {
        let mut app = app();
        let count = available_themes().len();
        let first = app.theme_name.clone();
        for _ in 0..count {
            app.apply(Action::CycleTheme, ms(0));
        }
        assert_eq!(app.theme_name, first);
    }

    #[test]
    fn test_live_completion_animates() {
        let mut app = app();
        assert_eq!(app.completion(), None);
        app.apply_live(
            LiveDataResult::Success {
                completion: 75.0,
                user: Some("ada@example.com".into()),
            },
            ms(0),
        );
        app.frame(ms(600));
        let midway = app.completion().unwrap();
        assert!(midway > 0.0 && midway < 75.0);
        app.frame(ms(1200));
        assert_eq!(app.completion(), Some(75.0));
        assert_eq!(app.user.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_live_failure_sets_status() {
        let mut app = app();
        app.apply_live(
            LiveDataResult::Failure {
                error: "connection refused".into(),
            },
            ms(0),
        );
        assert_eq!(
            app.status_message.as_deref(),
            Some("Offline: connection refused")
        );
    }

    #[test]
    fn test_shutdown_stops_frames() {
        let mut app = app();
        app.frame(ms(0));
        app.shutdown();
        assert!(!app.frames.has_pending());
        assert!(!app.needs_animation_frame());
    }
}
