//! Kiosk backend API.
//!
//! Four JSON endpoints, one per session operation. Every call is a single
//! attempt; retry policy belongs to the caller (the heartbeat timer).

pub mod client;
pub mod error;
pub mod protocol;

pub use client::HttpKioskClient;
pub use error::ApiError;
pub use protocol::{AuthResponse, HeartbeatResponse, RemoteCommand, StartGameResponse};

use kiosk_core::{Game, GameId};

/// Result of a backend call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Operations the session needs from the backend
#[trait_variant::make(KioskApi: Send)]
pub trait LocalKioskApi {
    /// Register this terminal and obtain a session token
    async fn authenticate(&self, device_id: &str, version: &str) -> ApiResult<AuthResponse>;

    /// Current catalog of playable titles
    async fn fetch_catalog(&self, token: &str) -> ApiResult<Vec<Game>>;

    /// Liveness report; returns the authoritative balance and remote commands
    async fn send_heartbeat(
        &self,
        token: &str,
        current_game_id: Option<&GameId>,
    ) -> ApiResult<HeartbeatResponse>;

    /// Ask the backend for a session URL for `game_slug`
    async fn start_game(&self, token: &str, game_slug: &GameId) -> ApiResult<StartGameResponse>;
}
