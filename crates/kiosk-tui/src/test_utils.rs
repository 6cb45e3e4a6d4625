//! Test utilities for TUI widget testing
//!
//! Provides a [`TestTerminal`] wrapper around ratatui's `TestBackend` and a
//! few ready-made application states for rendering tests.

use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, widgets::Widget, Frame, Terminal};

use kiosk_app::AppState;
use kiosk_core::{ActiveGame, Credits, Game, TerminalIdentity, TerminalStatus};

/// Standard test terminal width (typical kiosk console)
pub const TEST_WIDTH: u16 = 100;
/// Standard test terminal height
pub const TEST_HEIGHT: u16 = 30;

/// Compact terminal for space-constrained tests
pub const COMPACT_WIDTH: u16 = 40;
pub const COMPACT_HEIGHT: u16 = 12;

/// Test terminal wrapper with helper methods
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn compact() -> Self {
        Self::with_size(COMPACT_WIDTH, COMPACT_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    /// Render a widget to the full terminal area
    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|f| f.render_widget(widget, area))
            .expect("Failed to draw widget");
    }

    /// Draw a full frame, e.g. `term.draw_with(|frame| view(frame, &state))`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere
    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    /// Check if a specific line contains text
    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        get_line_content(self.buffer(), line).contains(text)
    }

    /// All content as a string (for debugging failed assertions)
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&get_line_content(buffer, y));
        result.push('\n');
    }
    result
}

fn get_line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

/// Authenticated terminal in the lobby with the built-in catalog
pub fn lobby_state() -> AppState {
    let mut state = AppState::new();
    state.session.status = TerminalStatus::Active;
    state.session.auth_token = Some("tok".into());
    state.session.credits = Credits::from_cents(1050);
    state.session.device_id = Some(TerminalIdentity::new(
        "a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8a9b0c1d2e3f4a5b6c7d8e9f0a1b2",
    ));
    state.session.use_fallback_catalog();
    state
}

/// Lobby state with a game running in the surface
pub fn playing_state() -> AppState {
    let mut state = lobby_state();
    state.session.active_game = Some(ActiveGame::new(
        Game::new(3, "Golden Empire"),
        "https://games.test/play",
        1,
    ));
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_creation() {
        let term = TestTerminal::new();
        assert_eq!(term.area().width, TEST_WIDTH);
        assert_eq!(term.area().height, TEST_HEIGHT);
    }

    #[test]
    fn test_compact_terminal() {
        let term = TestTerminal::compact();
        assert_eq!(term.area().width, COMPACT_WIDTH);
        assert_eq!(term.area().height, COMPACT_HEIGHT);
    }

    #[test]
    fn test_buffer_contains() {
        use ratatui::widgets::Paragraph;

        let mut term = TestTerminal::with_size(20, 5);
        let area = term.area();
        term.render_widget(Paragraph::new("Hello World"), area);

        assert!(term.buffer_contains("Hello World"));
        assert!(term.line_contains(0, "Hello"));
        assert!(!term.buffer_contains("Goodbye"));
    }
}
