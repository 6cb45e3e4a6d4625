//! Confirmation dialog widget for leaving a running game

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use super::modal_overlay;
use crate::theme::styles;

// Re-export state from app layer
pub use kiosk_app::confirm_dialog::ConfirmDialogState;

/// Yes/no prompt rendered over the current screen
pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDialogState) -> Self {
        Self { state }
    }

    fn options_line(&self) -> Line<'a> {
        let mut spans = Vec::new();
        for (index, (label, _)) in self.state.options.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled("   ", styles::text_muted()));
            }
            // Confirm first, styled as the primary action
            let style = if index == 0 {
                styles::keybinding().add_modifier(Modifier::BOLD)
            } else {
                styles::text_secondary()
            };
            spans.push(Span::styled(format!("[ {label} ]"), style));
        }
        Line::from(spans)
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        modal_overlay::dim_background(buf, area);

        let modal_area = modal_overlay::centered_rect(54, 8, area);
        Clear.render(modal_area, buf);
        modal_overlay::render_shadow(buf, modal_area);

        let title = format!(" {} ", self.state.title);
        let block = styles::modal_block(&title).title_alignment(Alignment::Center);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Message
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

        Paragraph::new(self.state.message.as_str())
            .alignment(Alignment::Center)
            .style(styles::text_primary())
            .render(chunks[1], buf);

        Paragraph::new(self.options_line())
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}
