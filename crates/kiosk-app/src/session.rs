//! The terminal session: authentication, balance, catalog and running game

use kiosk_core::{
    fallback_catalog, ActiveGame, Credits, Game, KioskProfile, TerminalIdentity, TerminalStatus,
};
use kiosk_host::AuthResponse;

/// Exactly one per process; mutated only by the update function.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub status: TerminalStatus,

    /// Bearer token issued at authentication
    pub auth_token: Option<String>,

    /// Last balance reported by the backend
    pub credits: Credits,

    pub kiosk_profile: Option<KioskProfile>,

    pub catalog: Vec<Game>,

    /// True while the built-in catalog is shown
    pub catalog_is_fallback: bool,

    /// Bumped whenever the catalog is replaced
    pub catalog_revision: u64,

    pub active_game: Option<ActiveGame>,

    /// Reason shown on the error screen
    pub error_message: Option<String>,

    /// Identity reported by the host, for display
    pub device_id: Option<TerminalIdentity>,

    /// Incremented on every accepted launch; never reset
    pub launch_attempt: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session seeded with a token persisted by a previous run
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            auth_token: token,
            ..Self::default()
        }
    }

    /// Back to `Loading` before startup runs again
    pub fn reset_for_reload(&mut self) {
        self.status = TerminalStatus::Loading;
        self.error_message = None;
        self.active_game = None;
        self.kiosk_profile = None;
        self.device_id = None;
    }

    /// Apply a successful authentication and become `Active`
    pub fn establish(&mut self, response: AuthResponse) {
        self.credits = response.kiosk.credits().unwrap_or(Credits::ZERO);
        self.auth_token = Some(response.token);
        self.kiosk_profile = Some(response.kiosk);
        self.error_message = None;
        self.status = TerminalStatus::Active;
    }

    /// Enter `Error`; only a reload leaves it
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = TerminalStatus::Error;
        self.error_message = Some(message.into());
        self.active_game = None;
    }

    /// Enter `Blocked` and drop the running game
    pub fn block(&mut self) {
        self.status = TerminalStatus::Blocked;
        self.active_game = None;
    }

    /// Replace the catalog wholesale; empty results use the fallback
    pub fn replace_catalog(&mut self, games: Vec<Game>) {
        if games.is_empty() {
            self.use_fallback_catalog();
        } else {
            self.catalog = games;
            self.catalog_is_fallback = false;
            self.catalog_revision += 1;
        }
    }

    pub fn use_fallback_catalog(&mut self) {
        self.catalog = fallback_catalog();
        self.catalog_is_fallback = true;
        self.catalog_revision += 1;
    }

    /// Overwrite the balance with a server value; returns whether it changed
    pub fn overwrite_credits(&mut self, credits: Option<Credits>) -> bool {
        match credits {
            Some(credits) if credits != self.credits => {
                self.credits = credits;
                true
            }
            _ => false,
        }
    }

    /// Enter `LoadingGame` and return the new launch attempt
    pub fn begin_launch(&mut self) -> u64 {
        self.launch_attempt += 1;
        self.status = TerminalStatus::LoadingGame;
        self.launch_attempt
    }

    /// Whether a launch completion for `attempt` may still be applied
    pub fn is_current_launch(&self, attempt: u64) -> bool {
        attempt == self.launch_attempt && self.status == TerminalStatus::LoadingGame
    }

    /// Whether a surface event for `attempt` belongs to the running game
    pub fn is_active_attempt(&self, attempt: u64) -> bool {
        self.active_game
            .as_ref()
            .is_some_and(|game| game.attempt == attempt)
    }

    pub fn is_playing(&self) -> bool {
        self.active_game.is_some()
    }

    pub fn active_title(&self) -> Option<&str> {
        self.active_game.as_ref().map(|g| g.game.title.as_str())
    }
}
