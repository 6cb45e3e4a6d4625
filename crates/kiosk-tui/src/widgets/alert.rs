//! Message box shown until the operator dismisses it

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use crate::theme::styles;

pub struct AlertDialog<'a> {
    message: &'a str,
}

impl<'a> AlertDialog<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Widget for AlertDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        modal_overlay::dim_background(buf, area);

        let modal_area = modal_overlay::centered_rect(60, 9, area);
        Clear.render(modal_area, buf);
        modal_overlay::render_shadow(buf, modal_area);

        let block = styles::modal_block(" NOTICE ").title_alignment(Alignment::Center);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let [_, message_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.message)
            .alignment(Alignment::Center)
            .style(styles::text_primary())
            .wrap(Wrap { trim: true })
            .render(message_area, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("[Enter]", styles::keybinding()),
            Span::styled(" OK", styles::text_secondary()),
        ]))
        .alignment(Alignment::Center)
        .render(hint_area, buf);
    }
}
