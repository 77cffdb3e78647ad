//! Page scaffolding: header, breadcrumb and footer

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

pub const HEADER_HEIGHT: u16 = 2;
pub const FOOTER_HEIGHT: u16 = 3;

/// Title row plus a breadcrumb trail
pub struct Header<'a> {
    pub title: &'a str,
    pub crumbs: &'a [&'a str],
    pub user: Option<&'a str>,
    pub theme: &'a Theme,
}

/// Breadcrumb trail joined with a separator
pub fn breadcrumb_line<'a>(crumbs: &[&'a str], theme: &Theme) -> Line<'a> {
    let mut spans = Vec::with_capacity(crumbs.len() * 2);
    for (index, crumb) in crumbs.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(theme.grey0)));
        }
        let style = if index + 1 == crumbs.len() {
            Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.grey1)
        };
        spans.push(Span::styled(*crumb, style));
    }
    Line::from(spans)
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, Style::default().bg(self.theme.bg1));

        let mut title = vec![
            Span::styled(" ◆ ", Style::default().fg(self.theme.accent)),
            Span::styled(
                self.title.to_string(),
                Style::default().fg(self.theme.fg1).add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(user) = self.user {
            title.push(Span::styled(format!("  ({})", user), Style::default().fg(self.theme.grey1)));
        }
        Paragraph::new(Line::from(title)).render(Rect::new(area.x, area.y, area.width, 1), buf);

        if area.height > 1 {
            let mut crumbs = breadcrumb_line(self.crumbs, self.theme);
            crumbs.spans.insert(0, Span::raw("   "));
            Paragraph::new(crumbs).render(Rect::new(area.x, area.y + 1, area.width, 1), buf);
        }
    }
}

pub struct Footer<'a> {
    pub theme: &'a Theme,
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let muted = Style::default().fg(self.theme.grey0);
        Paragraph::new(vec![
            Line::from(Span::styled("─".repeat(area.width as usize), muted)),
            Line::from(Span::styled(
                "complyviz · ISO 27001 · NIS2 · GDPR · DORA",
                Style::default().fg(self.theme.grey1),
            )),
            Line::from(Span::styled("Privacy  ·  Terms  ·  Security", muted)),
        ])
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}
