//! Request and response bodies of the kiosk backend

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use kiosk_core::{Credits, Game, GameId, KioskProfile};

pub const AUTH_PATH: &str = "kiosk/auth";
pub const GAMES_PATH: &str = "kiosk/games";
pub const HEARTBEAT_PATH: &str = "kiosk/heartbeat";
pub const START_GAME_PATH: &str = "kiosk/start-game";

/// Remote command value that locks the terminal
pub const LOCK_SCREEN: &str = "LOCK_SCREEN";

#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest<'a> {
    pub device_id: &'a str,
    pub version: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub kiosk: KioskProfile,
}

/// Decode catalog entries one by one, skipping malformed ones
pub fn decode_catalog(entries: Vec<Value>) -> Vec<Game> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Game>(entry) {
            Ok(game) => Some(game),
            Err(e) => {
                warn!("Skipping catalog entry {}: {}", index, e);
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct HeartbeatRequest<'a> {
    /// Always present on the wire, `null` when idle
    pub current_game_id: Option<&'a GameId>,
}

/// Command pushed by the backend in a heartbeat response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    LockScreen,
    Unknown(String),
}

impl RemoteCommand {
    pub fn parse(value: &str) -> Self {
        if value == LOCK_SCREEN {
            Self::LockScreen
        } else {
            Self::Unknown(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HeartbeatResponse {
    /// Number or numeric string; anything else leaves the balance unchanged
    #[serde(default)]
    pub credits: Value,
    /// Only string values are commands; anything else is ignored
    #[serde(default)]
    pub command: Value,
}

impl HeartbeatResponse {
    pub fn credits(&self) -> Option<Credits> {
        Credits::from_json(&self.credits)
    }

    pub fn command(&self) -> Option<RemoteCommand> {
        self.command
            .as_str()
            .filter(|c| !c.is_empty())
            .map(RemoteCommand::parse)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StartGameRequest<'a> {
    pub game_slug: &'a GameId,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StartGameResponse {
    pub url: String,
}
