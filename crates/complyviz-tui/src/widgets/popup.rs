use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Key bindings listed in the help popup
pub const HELP_BINDINGS: &[(&str, &str)] = &[
    ("j / k", "scroll one step"),
    ("Ctrl-d / Ctrl-u", "half page down / up"),
    ("Space / Ctrl-f", "page down"),
    ("gg / G", "jump to top / bottom"),
    ("r", "replay panels already revealed"),
    ("t", "cycle theme"),
    ("?", "this help"),
    ("q", "quit"),
];

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key binding overlay
    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();

        let popup_width = 48u16.min(area.width.saturating_sub(4));
        let popup_height = (HELP_BINDINGS.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut lines: Vec<Line> = HELP_BINDINGS
            .iter()
            .map(|(keys, description)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>16}", keys),
                        Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(*description, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                "press any key to close",
                Style::default().fg(theme.grey1),
            ))
            .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines), inner_area);
    }
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
