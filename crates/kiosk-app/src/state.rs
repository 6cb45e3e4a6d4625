//! Application state (Model in TEA pattern)

use kiosk_core::{Game, TerminalStatus};

use crate::config::Settings;
use crate::confirm_dialog::ConfirmDialogState;
use crate::input_key::Direction;
use crate::session::Session;

/// Columns of the catalog grid
pub const CATALOG_COLUMNS: usize = 4;

/// Which screen the presentation layer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    LoadingGame,
    Blocked,
    Error,
    Lobby,
    Game,
}

/// Catalog selection in the lobby
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LobbyState {
    pub selected: usize,
}

impl LobbyState {
    /// Move within a grid of `len` entries laid out in `columns` columns
    pub fn move_selection(&mut self, direction: Direction, len: usize, columns: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let columns = columns.max(1);
        let current = self.selected.min(len - 1);

        self.selected = match direction {
            Direction::Left => current.saturating_sub(1),
            Direction::Right => (current + 1).min(len - 1),
            Direction::Up => current.checked_sub(columns).unwrap_or(current),
            Direction::Down => {
                let next = current + columns;
                if next < len {
                    next
                } else {
                    current
                }
            }
        };
    }

    /// Keep the selection inside a catalog of `len` entries
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub session: Session,

    pub lobby: LobbyState,

    /// Yes/no prompt, shown above everything else
    pub confirm_dialog: Option<ConfirmDialogState>,

    /// Message box waiting to be dismissed
    pub alert: Option<String>,

    pub settings: Settings,

    /// Loading animation frame
    pub spinner_frame: usize,

    quitting: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default(), None)
    }

    /// State for a fresh start; `token` is the one persisted by the last run
    pub fn with_settings(settings: Settings, token: Option<String>) -> Self {
        Self {
            session: Session::with_token(token),
            lobby: LobbyState::default(),
            confirm_dialog: None,
            alert: None,
            settings,
            spinner_frame: 0,
            quitting: false,
        }
    }

    pub fn screen(&self) -> Screen {
        match self.session.status {
            TerminalStatus::Loading => Screen::Loading,
            TerminalStatus::LoadingGame => Screen::LoadingGame,
            TerminalStatus::Blocked => Screen::Blocked,
            TerminalStatus::Error => Screen::Error,
            TerminalStatus::Active if self.session.is_playing() => Screen::Game,
            TerminalStatus::Active => Screen::Lobby,
        }
    }

    pub fn request_quit(&mut self) {
        self.quitting = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn selected_game(&self) -> Option<&Game> {
        self.session.catalog.get(self.lobby.selected)
    }

    /// Balance formatted per the UI settings, e.g. `R$ 10,00`
    pub fn credits_display(&self) -> String {
        let ui = &self.settings.ui;
        self.session
            .credits
            .format_with_symbol(&ui.currency_symbol, ui.number_style)
    }
}
