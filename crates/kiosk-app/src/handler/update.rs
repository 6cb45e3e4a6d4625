//! Main update function - handles state transitions (TEA pattern)

use tracing::debug;

use crate::message::Message;
use crate::state::{AppState, CATALOG_COLUMNS};

use super::{heartbeat, keys::handle_key, launch, startup, UpdateResult};

/// Spinner frames cycled on the loading screens
const SPINNER_FRAMES: usize = 4;

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            state.spinner_frame = (state.spinner_frame + 1) % SPINNER_FRAMES;
            UpdateResult::none()
        }

        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Startup
        // ─────────────────────────────────────────────────────────
        Message::Startup => startup::handle_startup(state),
        Message::Reload => startup::handle_reload(state),
        Message::DeviceIdResolved { identity } => {
            startup::handle_device_id_resolved(state, identity)
        }
        Message::AuthSucceeded { response } => startup::handle_auth_succeeded(state, response),
        Message::AuthFailed { error } => startup::handle_auth_failed(state, error),
        Message::PersistToken { token } => startup::handle_persist_token(token),
        Message::CatalogLoaded { games } => startup::handle_catalog_loaded(state, games),
        Message::CatalogFailed { error } => startup::handle_catalog_failed(state, error),

        // ─────────────────────────────────────────────────────────
        // Heartbeat
        // ─────────────────────────────────────────────────────────
        Message::HeartbeatSucceeded { response } => {
            heartbeat::handle_heartbeat_succeeded(state, response)
        }
        Message::HeartbeatFailed { error } => heartbeat::handle_heartbeat_failed(state, error),

        // ─────────────────────────────────────────────────────────
        // Lobby
        // ─────────────────────────────────────────────────────────
        Message::MoveSelection(direction) => {
            let len = state.session.catalog.len();
            state
                .lobby
                .move_selection(direction, len, CATALOG_COLUMNS);
            UpdateResult::none()
        }

        Message::LaunchSelected => match state.selected_game() {
            Some(game) => UpdateResult::message(Message::LaunchGame { game: game.clone() }),
            None => {
                debug!("Launch requested with an empty catalog");
                UpdateResult::none()
            }
        },

        Message::LaunchGame { game } => launch::handle_launch_game(state, game),
        Message::GameStarted { attempt, game, url } => {
            launch::handle_game_started(state, attempt, game, url)
        }
        Message::GameStartFailed { attempt, error } => {
            launch::handle_game_start_failed(state, attempt, error)
        }

        // ─────────────────────────────────────────────────────────
        // Game surface
        // ─────────────────────────────────────────────────────────
        Message::SurfaceFailed { attempt, message } => {
            launch::handle_surface_failed(state, attempt, message)
        }
        Message::Surface { attempt, event } => launch::handle_surface_event(state, attempt, event),
        Message::SurfaceExited { attempt } => launch::handle_surface_exited(state, attempt),
        Message::RequestCloseGame => launch::handle_request_close(state),
        Message::ConfirmCloseGame => launch::handle_confirm_close(state),
        Message::CancelCloseGame => {
            state.confirm_dialog = None;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Alerts
        // ─────────────────────────────────────────────────────────
        Message::DismissAlert => {
            state.alert = None;
            UpdateResult::none()
        }
    }
}
