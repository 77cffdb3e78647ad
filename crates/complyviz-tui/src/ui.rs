//! Top-level frame layout: header, scrolling page, status bar, overlays

use std::time::Duration;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::{App, Mode};
use crate::widgets::{Header, PopupWidget, StatusBarWidget, HEADER_HEIGHT};

pub const TITLE: &str = "complyviz";

/// Split the terminal into header, page and status bar
pub fn layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Advance the app to `now` for the given terminal size, then draw
pub fn draw(frame: &mut Frame, app: &mut App, now: Duration) {
    let [header, page, status] = layout(frame.area());
    app.set_viewport(page.width, page.height);
    app.frame(now);

    let crumbs = app.crumbs();
    frame.render_widget(
        Header {
            title: TITLE,
            crumbs: &crumbs,
            user: app.user.as_deref(),
            theme: &app.theme,
        },
        header,
    );

    app.dashboard.render(
        page,
        frame.buffer_mut(),
        app.scroll_position(),
        app.completion(),
        &app.theme,
    );
    StatusBarWidget::render(frame, status, app);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, &app.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use complyviz_core::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_layout_reserves_header_and_status() {
        let [header, page, status] = layout(Rect::new(0, 0, 80, 24));
        assert_eq!(header.height, HEADER_HEIGHT);
        assert_eq!(status.height, 1);
        assert_eq!(page.height, 24 - HEADER_HEIGHT - 1);
        assert_eq!(status.y, 23);
    }

    #[test]
    fn test_draw_sizes_viewport_and_starts_panels() {
        let mut app = App::new(&AppConfig::default()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| draw(frame, &mut app, Duration::ZERO))
            .unwrap();

        assert_eq!(app.viewport, (100, 40 - HEADER_HEIGHT - 1));
        assert!(app.dashboard.panels()[0].trigger().is_visible());

        let buffer = terminal.backend().buffer();
        let header: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(header.contains(TITLE));
    }
}
