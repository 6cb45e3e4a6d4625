//! Screen shown while a game runs in its own window

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

/// Toolbar with the balance, the running title and the close hint
pub struct GameToolbar<'a> {
    title: &'a str,
    credits: &'a str,
}

impl<'a> GameToolbar<'a> {
    pub fn new(title: &'a str, credits: &'a str) -> Self {
        Self { title, credits }
    }
}

impl Widget for GameToolbar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let [left, center, right] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Fill(2),
            Constraint::Fill(1),
        ])
        .areas(inner);

        Paragraph::new(Line::from(vec![
            Span::styled(" CREDITS ", styles::text_muted()),
            Span::styled(self.credits, styles::credits()),
        ]))
        .render(left, buf);

        Paragraph::new(Span::styled(self.title, styles::text_bright_bold()))
            .alignment(Alignment::Center)
            .render(center, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("[X]", styles::keybinding()),
            Span::styled(" Close game ", styles::text_secondary()),
        ]))
        .alignment(Alignment::Right)
        .render(right, buf);
    }
}

/// Body below the toolbar
pub struct GameBody<'a> {
    title: &'a str,
}

impl<'a> GameBody<'a> {
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }
}

impl Widget for GameBody<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled(format!("▶ {}", self.title), styles::brand())),
            Line::from(""),
            Line::from(Span::styled(
                "The game is open in its own window.",
                styles::text_secondary(),
            )),
        ];
        let top = area.height.saturating_sub(lines.len() as u16) / 2;
        let content = Rect::new(area.x, area.y + top, area.width, area.height - top);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(content, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_toolbar_shows_credits_title_and_close_hint() {
        let mut term = TestTerminal::with_size(100, 3);
        let area = term.area();
        term.render_widget(GameToolbar::new("Golden Empire", "R$ 8,00"), area);

        assert!(term.line_contains(1, "CREDITS R$ 8,00"));
        assert!(term.line_contains(1, "Golden Empire"));
        assert!(term.line_contains(1, "[X] Close game"));
    }

    #[test]
    fn test_body_names_running_game() {
        let mut term = TestTerminal::with_size(60, 10);
        let area = term.area();
        term.render_widget(GameBody::new("Golden Empire"), area);

        assert!(term.buffer_contains("▶ Golden Empire"));
        assert!(term.buffer_contains("own window"));
    }
}
