//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON.

use kiosk_core::{ActiveGame, Credits, GameId, TerminalStatus};

/// Observable change in the terminal session
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The terminal moved to another status
    StatusChanged {
        old: TerminalStatus,
        new: TerminalStatus,
    },

    /// The balance changed
    CreditsUpdated { credits: Credits },

    /// A new catalog is on display
    CatalogLoaded { count: usize, fallback: bool },

    /// A game surface is being shown
    GameOpened { game: ActiveGame },

    /// The running game went away
    GameClosed { game_id: GameId },

    /// A message box was raised
    Alert { message: String },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::StatusChanged { .. } => "status_changed",
            Self::CreditsUpdated { .. } => "credits_updated",
            Self::CatalogLoaded { .. } => "catalog_loaded",
            Self::GameOpened { .. } => "game_opened",
            Self::GameClosed { .. } => "game_closed",
            Self::Alert { .. } => "alert",
            Self::Shutdown => "shutdown",
        }
    }
}
