//! Full-screen status panels: loading, connecting, blocked and error

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use kiosk_core::TerminalIdentity;

use super::header::BRAND;
use super::modal_overlay::centered_rect;
use crate::theme::{palette, styles};

/// Braille spinner frames, advanced by `Message::Tick`
const SPINNER: &[&str] = &["⠋", "⠙", "⠸", "⠴"];

pub enum StatusScreen<'a> {
    Loading { frame: usize },
    ConnectingGame { frame: usize },
    Blocked { device: Option<&'a TerminalIdentity> },
    Error { message: &'a str },
}

impl StatusScreen<'_> {
    fn lines(&self) -> Vec<Line<'_>> {
        let brand = Line::from(Span::styled(BRAND, styles::brand()));
        match self {
            StatusScreen::Loading { frame } => vec![
                brand,
                Line::from(""),
                spinner_line(*frame, "LOADING..."),
            ],
            StatusScreen::ConnectingGame { frame } => vec![
                brand,
                Line::from(""),
                spinner_line(*frame, "CONNECTING TO GAME..."),
            ],
            StatusScreen::Blocked { device } => vec![
                Line::from(Span::styled("TERMINAL BLOCKED", styles::status_red_bold())),
                Line::from(""),
                Line::from(Span::styled(
                    "Contact the administrator",
                    styles::text_primary(),
                )),
                Line::from(Span::styled(
                    format!(
                        "ID: {}",
                        device.map(TerminalIdentity::as_str).unwrap_or("unknown")
                    ),
                    styles::text_muted(),
                )),
                Line::from(""),
                reload_hint(),
            ],
            StatusScreen::Error { message } => vec![
                Line::from(Span::styled("CONNECTION ERROR", styles::status_red_bold())),
                Line::from(""),
                Line::from(Span::styled(*message, styles::text_primary())),
                Line::from(""),
                reload_hint(),
            ],
        }
    }
}

fn spinner_line(frame: usize, label: &str) -> Line<'_> {
    Line::from(vec![
        Span::styled(SPINNER[frame % SPINNER.len()], styles::brand()),
        Span::raw(" "),
        Span::styled(label, styles::text_secondary()),
    ])
}

fn reload_hint() -> Line<'static> {
    Line::from(vec![
        Span::styled("Press ", styles::text_muted()),
        Span::styled("R", styles::keybinding()),
        Span::styled(" to reload", styles::text_muted()),
    ])
}

impl Widget for StatusScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let height = lines.len() as u16 + 4;
        let panel = centered_rect(72, height, area);
        Clear.render(panel, buf);

        let block = styles::glass_block(false).style(Style::default().bg(palette::DEEPEST_BG));
        let inner = block.inner(panel);
        block.render(panel, buf);

        let content = Rect::new(
            inner.x,
            inner.y + inner.height.min(1),
            inner.width,
            inner.height.saturating_sub(1),
        );
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(content, buf);
    }
}
