//! Abstract input key event, independent of terminal library.
//!
//! Converted from crossterm key events at the TUI boundary so the session
//! layer and the headless runner never depend on terminal types.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key
    Char(char),
    /// Character with Ctrl held
    CharCtrl(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
}

impl InputKey {
    /// Map vim-style movement letters onto arrows
    pub fn as_direction(&self) -> Option<Direction> {
        match self {
            InputKey::Up | InputKey::Char('k') => Some(Direction::Up),
            InputKey::Down | InputKey::Char('j') => Some(Direction::Down),
            InputKey::Left | InputKey::Char('h') => Some(Direction::Left),
            InputKey::Right | InputKey::Char('l') => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Movement across the catalog grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}
