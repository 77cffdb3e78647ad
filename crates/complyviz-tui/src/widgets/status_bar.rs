use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match app.mode {
            Mode::Normal if app.dashboard.is_animating() => "ANIMATING",
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };

        let max_scroll = app.max_scroll();
        let position = if max_scroll == 0 {
            "All".to_string()
        } else {
            let scroll = app.scroll_position();
            match scroll {
                0 => "Top".to_string(),
                s if s >= max_scroll => "Bot".to_string(),
                s => format!("{}%", u32::from(s) * 100 / u32::from(max_scroll)),
            }
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let revealed = app
                .dashboard
                .panels()
                .iter()
                .filter(|p| p.trigger().is_visible())
                .count();
            format!(
                " {} | {} | Panels: {}/{} | {}",
                mode_str,
                position,
                revealed,
                app.dashboard.panels().len(),
                app.theme_name
            )
        };

        let help_hint = " q:quit j/k:scroll gg/G:top/bottom r:replay ?:help ";
        let padding_len = area
            .width
            .saturating_sub(status_text.chars().count() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use complyviz_core::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_status_shows_position_and_panels() {
        let app = App::new(&AppConfig::default()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(120, 1)).unwrap();
        terminal
            .draw(|frame| StatusBarWidget::render(frame, frame.area(), &app))
            .unwrap();
        let text = row_text(&terminal, 0);
        assert!(text.contains("NORMAL | Top | Panels: 0/6"));
        assert!(text.contains("r:replay"));
    }

    #[test]
    fn test_status_message_replaces_summary() {
        let mut app = App::new(&AppConfig::default()).unwrap();
        app.set_status("Theme: nord");
        let mut terminal = Terminal::new(TestBackend::new(120, 1)).unwrap();
        terminal
            .draw(|frame| StatusBarWidget::render(frame, frame.area(), &app))
            .unwrap();
        let text = row_text(&terminal, 0);
        assert!(text.starts_with(" Theme: nord"));
        assert!(!text.contains("Panels:"));
    }
}
