//! Lobby header: brand, terminal id and credits box

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use kiosk_core::TerminalIdentity;

use crate::theme::{palette, styles};

pub const BRAND: &str = "KIOSKPLAY";

/// Characters of the terminal id shown next to the brand
pub const SHORT_ID_LEN: usize = 12;

pub struct LobbyHeader<'a> {
    device: Option<&'a TerminalIdentity>,
    credits: &'a str,
}

impl<'a> LobbyHeader<'a> {
    pub fn new(device: Option<&'a TerminalIdentity>, credits: &'a str) -> Self {
        Self { device, credits }
    }
}

impl Widget for LobbyHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let device = self.device.map(|d| d.short(SHORT_ID_LEN)).unwrap_or("------");
        let left = Line::from(vec![
            Span::styled(format!(" {BRAND}"), styles::brand()),
            Span::styled("  │  ", styles::text_muted()),
            Span::styled("ID ", styles::text_muted()),
            Span::styled(device, styles::text_secondary()),
        ]);
        buf.set_line(inner.x, inner.y, &left, inner.width);

        // Credits box, right-aligned
        let credits = Line::from(vec![
            Span::styled("┃ CREDITS ", Style::default().fg(palette::GOLD_DIM)),
            Span::styled(self.credits, styles::credits()),
            Span::styled(" ┃ ", Style::default().fg(palette::GOLD_DIM)),
        ]);
        let credits_width = credits.width() as u16;
        let left_width = left.width() as u16;
        if left_width + credits_width < inner.width {
            let x = inner.x + inner.width - credits_width;
            buf.set_line(x, inner.y, &credits, credits_width);
        } else if inner.height > 1 {
            buf.set_line(inner.x, inner.y + 1, &credits, inner.width);
        }
    }
}
