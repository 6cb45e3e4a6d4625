//! Catalog grid shown in the lobby

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use kiosk_app::CATALOG_COLUMNS;
use kiosk_core::Game;

use crate::theme::{palette, styles};

/// Rows taken by one card, borders included
pub const CARD_HEIGHT: u16 = 5;

pub struct CatalogGrid<'a> {
    games: &'a [Game],
    selected: usize,
    fallback: bool,
}

impl<'a> CatalogGrid<'a> {
    pub fn new(games: &'a [Game], selected: usize) -> Self {
        Self {
            games,
            selected,
            fallback: false,
        }
    }

    /// Mark the built-in catalog as shown
    pub fn fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// First visible row so that the selected row stays on screen
    fn first_row(&self, visible_rows: usize) -> usize {
        let selected_row = self.selected / CATALOG_COLUMNS;
        selected_row.saturating_sub(visible_rows.saturating_sub(1))
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" ▸ ", styles::brand()),
            Span::styled(
                format!("{} titles available", self.games.len()),
                styles::text_bright_bold(),
            ),
        ];
        if self.fallback {
            spans.push(Span::styled("  (offline catalog)", styles::text_muted()));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }

    fn render_card(game: &Game, focused: bool, area: Rect, buf: &mut Buffer) {
        let accent = game.color.as_deref().and_then(palette::parse_hex);
        let block = styles::card_block(accent, focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let title_style = if focused {
            styles::focused_selected()
        } else {
            styles::text_primary()
        };
        let title = truncate(&game.title, inner.width as usize);
        let mut lines = vec![Line::from(Span::styled(title, title_style))];
        if inner.height > 1 {
            lines.push(Line::from(Span::styled(
                game.kind.as_str(),
                styles::text_muted(),
            )));
        }

        // Vertically center the content
        let top = inner.height.saturating_sub(lines.len() as u16) / 2;
        let content = Rect::new(inner.x, inner.y + top, inner.width, inner.height - top);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(content, buf);
    }
}

impl Widget for CatalogGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 || area.width == 0 {
            return;
        }

        self.render_title(Rect::new(area.x, area.y, area.width, 1), buf);

        let grid = Rect::new(area.x, area.y + 2, area.width, area.height.saturating_sub(2));
        if self.games.is_empty() || grid.height == 0 {
            return;
        }

        let card_width = grid.width / CATALOG_COLUMNS as u16;
        if card_width == 0 {
            return;
        }
        let visible_rows = ((grid.height / CARD_HEIGHT) as usize).max(1);
        let first_row = self.first_row(visible_rows);

        for (index, game) in self.games.iter().enumerate() {
            let row = index / CATALOG_COLUMNS;
            if row < first_row || row >= first_row + visible_rows {
                continue;
            }
            let column = (index % CATALOG_COLUMNS) as u16;
            let y = grid.y + (row - first_row) as u16 * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(grid.bottom().saturating_sub(y));
            let card = Rect::new(grid.x + column * card_width, y, card_width, height);
            Self::render_card(game, index == self.selected, card, buf);
        }
    }
}

/// Cut `text` to `max` columns, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use kiosk_core::fallback_catalog;

    #[test]
    fn test_grid_shows_count_and_titles() {
        let games = fallback_catalog();
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(CatalogGrid::new(&games, 0).fallback(true), area);

        assert!(term.buffer_contains(&format!("{} titles available", games.len())));
        assert!(term.buffer_contains("(offline catalog)"));
        assert!(term.buffer_contains(&games[0].title));
        assert!(term.buffer_contains(&games[1].title));
    }

    #[test]
    fn test_grid_scrolls_to_selected_row() {
        let games: Vec<Game> = (1..=20i64)
            .map(|i| Game::new(i, format!("Title {i:02}")))
            .collect();
        // Room for two rows of cards below the title
        let mut term = TestTerminal::with_size(100, 2 + 2 * CARD_HEIGHT);
        let area = term.area();
        term.render_widget(CatalogGrid::new(&games, 17), area);

        assert!(term.buffer_contains("Title 18"), "selected card visible");
        assert!(!term.buffer_contains("Title 01"), "first row scrolled away");
        assert!(!term.buffer_contains("(offline catalog)"));
    }

    #[test]
    fn test_empty_catalog_renders_count_only() {
        let mut term = TestTerminal::with_size(60, 10);
        let area = term.area();
        term.render_widget(CatalogGrid::new(&[], 0), area);
        assert!(term.buffer_contains("0 titles available"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Fortune Tiger", 20), "Fortune Tiger");
        assert_eq!(truncate("Fortune Tiger", 8), "Fortune…");
        assert_eq!(truncate("Fortune Tiger", 0), "");
    }
}
