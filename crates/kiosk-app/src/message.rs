//! Message types for the application (TEA pattern)

use kiosk_core::{Game, TerminalIdentity};
use kiosk_host::{ApiError, AuthResponse, HeartbeatResponse, SurfaceEvent};

use crate::input_key::{Direction, InputKey};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event, already converted from the terminal library
    Key(InputKey),

    /// Animation tick for loading screens
    Tick,

    /// Quit the application
    Quit,

    // ─────────────────────────────────────────────────────────
    // Startup
    // ─────────────────────────────────────────────────────────
    /// Run the startup sequence (first boot)
    Startup,

    /// Leave Blocked/Error and run startup again
    Reload,

    /// Host bridge answered with the terminal identity
    DeviceIdResolved { identity: TerminalIdentity },

    AuthSucceeded { response: AuthResponse },

    AuthFailed { error: ApiError },

    /// Persist a newly issued session token
    PersistToken { token: String },

    CatalogLoaded { games: Vec<Game> },

    CatalogFailed { error: ApiError },

    // ─────────────────────────────────────────────────────────
    // Heartbeat
    // ─────────────────────────────────────────────────────────
    HeartbeatSucceeded { response: HeartbeatResponse },

    HeartbeatFailed { error: ApiError },

    // ─────────────────────────────────────────────────────────
    // Lobby
    // ─────────────────────────────────────────────────────────
    /// Move the catalog selection
    MoveSelection(Direction),

    /// Launch the selected catalog entry
    LaunchSelected,

    /// Launch a specific title
    LaunchGame { game: Game },

    /// Backend issued a URL for launch `attempt`
    GameStarted {
        attempt: u64,
        game: Game,
        url: String,
    },

    /// Backend refused or failed launch `attempt`
    GameStartFailed { attempt: u64, error: ApiError },

    // ─────────────────────────────────────────────────────────
    // Game surface
    // ─────────────────────────────────────────────────────────
    /// The surface for `attempt` could not be opened
    SurfaceFailed { attempt: u64, message: String },

    /// Event from the surface opened for `attempt`
    Surface { attempt: u64, event: SurfaceEvent },

    /// The surface opened for `attempt` went away
    SurfaceExited { attempt: u64 },

    /// Ask before closing the running game
    RequestCloseGame,

    ConfirmCloseGame,

    CancelCloseGame,

    // ─────────────────────────────────────────────────────────
    // Alerts
    // ─────────────────────────────────────────────────────────
    DismissAlert,
}
