//! Lobby footer: connection status and client version

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{palette, styles};

pub struct Footer<'a> {
    version: &'a str,
}

impl<'a> Footer<'a> {
    pub fn new(version: &'a str) -> Self {
        Self { version }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(palette::CARD_BG));

        let status = Line::from(vec![
            Span::styled(" ● ", Style::default().fg(palette::STATUS_GREEN)),
            Span::styled("CONNECTED TO SERVER", styles::text_secondary()),
        ]);
        buf.set_line(area.x, area.y, &status, area.width);

        let version = Line::from(Span::styled(
            format!("V {} ", self.version),
            styles::text_muted(),
        ));
        let width = version.width() as u16;
        if status.width() as u16 + width < area.width {
            buf.set_line(area.x + area.width - width, area.y, &version, width);
        }
    }
}
