//! Headless mode - NDJSON event output
//!
//! Runs the engine without the terminal UI and prints one JSON object per
//! line on stdout for every observable change in the session. Useful for
//! unattended terminals and for scripting against a staging backend.
//!
//! # Example Output
//!
//! ```json
//! {"event":"status_changed","from":"loading","to":"active","timestamp":1704700001000}
//! {"event":"credits_updated","credits":10.5,"timestamp":1704700001000}
//! {"event":"catalog_loaded","count":8,"fallback":true,"timestamp":1704700001200}
//! ```

pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use kiosk_app::EngineEvent;
use kiosk_core::{Credits, GameId, TerminalStatus};

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    StatusChanged {
        from: TerminalStatus,
        to: TerminalStatus,
        timestamp: i64,
    },

    CreditsUpdated { credits: Credits, timestamp: i64 },

    CatalogLoaded {
        count: usize,
        fallback: bool,
        timestamp: i64,
    },

    /// Launch URLs carry session credentials and are never printed
    GameOpened {
        game_id: GameId,
        title: String,
        partition: String,
        timestamp: i64,
    },

    GameClosed { game_id: GameId, timestamp: i64 },

    Alert { message: String, timestamp: i64 },
}

impl HeadlessEvent {
    /// Translate an engine event; `None` for events with no NDJSON form
    pub fn from_engine(event: &EngineEvent) -> Option<Self> {
        let timestamp = Self::now();
        let event = match event {
            EngineEvent::StatusChanged { old, new } => Self::StatusChanged {
                from: *old,
                to: *new,
                timestamp,
            },
            EngineEvent::CreditsUpdated { credits } => Self::CreditsUpdated {
                credits: *credits,
                timestamp,
            },
            EngineEvent::CatalogLoaded { count, fallback } => Self::CatalogLoaded {
                count: *count,
                fallback: *fallback,
                timestamp,
            },
            EngineEvent::GameOpened { game } => Self::GameOpened {
                game_id: game.id().clone(),
                title: game.game.title.clone(),
                partition: game.partition.clone(),
                timestamp,
            },
            EngineEvent::GameClosed { game_id } => Self::GameClosed {
                game_id: game_id.clone(),
                timestamp,
            },
            EngineEvent::Alert { message } => Self::Alert {
                message: message.clone(),
                timestamp,
            },
            EngineEvent::Shutdown => return None,
        };
        Some(event)
    }

    /// Emit this event to stdout as one JSON line
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::{ActiveGame, Game};

    fn to_value(event: &EngineEvent) -> serde_json::Value {
        let headless = HeadlessEvent::from_engine(event).expect("event has an NDJSON form");
        let json = serde_json::to_string(&headless).expect("serialization failed");
        serde_json::from_str(&json).expect("invalid JSON")
    }

    #[test]
    fn test_status_changed_serialization() {
        let value = to_value(&EngineEvent::StatusChanged {
            old: TerminalStatus::Active,
            new: TerminalStatus::LoadingGame,
        });

        assert_eq!(value["event"], "status_changed");
        assert_eq!(value["from"], "active");
        assert_eq!(value["to"], "loading_game");
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_credits_serialize_as_number() {
        let value = to_value(&EngineEvent::CreditsUpdated {
            credits: Credits::from_cents(1050),
        });
        assert_eq!(value["event"], "credits_updated");
        assert_eq!(value["credits"], 10.5);
    }

    #[test]
    fn test_game_opened_omits_launch_url() {
        let game = ActiveGame::new(
            Game::new(3, "Golden Empire"),
            "https://games.test/play?token=secret",
            1,
        );
        let value = to_value(&EngineEvent::GameOpened { game });

        assert_eq!(value["event"], "game_opened");
        assert_eq!(value["game_id"], 3);
        assert_eq!(value["title"], "Golden Empire");
        assert_eq!(value["partition"], "persist:game_3");
        assert!(!value.to_string().contains("secret"));
    }

    #[test]
    fn test_game_closed_keeps_text_ids() {
        let value = to_value(&EngineEvent::GameClosed {
            game_id: GameId::Text("fortune-ox".into()),
        });
        assert_eq!(value["game_id"], "fortune-ox");
    }

    #[test]
    fn test_shutdown_has_no_ndjson_form() {
        assert!(HeadlessEvent::from_engine(&EngineEvent::Shutdown).is_none());
    }
}
