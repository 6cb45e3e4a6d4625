//! Game launch, surface lifecycle and close confirmation

use kiosk_core::{ActiveGame, Game, TerminalStatus};
use kiosk_host::{ApiError, SurfaceEvent};
use tracing::{debug, info, warn};

use crate::confirm_dialog::ConfirmDialogState;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

const INSUFFICIENT_BALANCE: &str = "Insufficient balance to start.";

fn launch_failed_alert(detail: &str) -> String {
    format!("Failed to open game: {detail}")
}

pub fn handle_launch_game(state: &mut AppState, game: Game) -> UpdateResult {
    let session = &state.session;
    if session.status != TerminalStatus::Active || session.is_playing() {
        debug!("Launch of '{}' ignored in status {}", game.title, session.status);
        return UpdateResult::none();
    }

    let Some(token) = session.auth_token.clone() else {
        warn!("Launch of '{}' without a session token", game.title);
        return UpdateResult::none();
    };

    if !session.credits.is_positive() {
        info!("Launch of '{}' refused: no balance", game.title);
        state.show_alert(INSUFFICIENT_BALANCE);
        return UpdateResult::none();
    }

    let attempt = state.session.begin_launch();
    info!("Launching '{}' (attempt {})", game.title, attempt);

    UpdateResult::action(UpdateAction::StartGame {
        attempt,
        token,
        game,
    })
}

pub fn handle_game_started(
    state: &mut AppState,
    attempt: u64,
    game: Game,
    url: String,
) -> UpdateResult {
    if !state.session.is_current_launch(attempt) {
        debug!("Dropping stale launch completion (attempt {})", attempt);
        return UpdateResult::none();
    }

    let active = ActiveGame::new(game, url, attempt);
    info!("Opening '{}' in partition {}", active.game.title, active.partition);

    state.session.active_game = Some(active.clone());
    state.session.status = TerminalStatus::Active;

    UpdateResult::action(UpdateAction::OpenSurface { game: active })
}

pub fn handle_game_start_failed(
    state: &mut AppState,
    attempt: u64,
    error: ApiError,
) -> UpdateResult {
    if !state.session.is_current_launch(attempt) {
        debug!("Dropping stale launch failure (attempt {})", attempt);
        return UpdateResult::none();
    }

    warn!("Launch failed: {}", error);
    state.session.status = TerminalStatus::Active;
    state.show_alert(launch_failed_alert(&error.launch_detail()));
    UpdateResult::none()
}

pub fn handle_surface_failed(state: &mut AppState, attempt: u64, message: String) -> UpdateResult {
    if !state.session.is_active_attempt(attempt) {
        debug!("Dropping surface failure for attempt {}", attempt);
        return UpdateResult::none();
    }

    warn!("Game surface failed: {}", message);
    state.session.active_game = None;
    state.confirm_dialog = None;
    state.show_alert(launch_failed_alert(&message));
    UpdateResult::none()
}

pub fn handle_surface_event(state: &mut AppState, attempt: u64, event: SurfaceEvent) -> UpdateResult {
    if !state.session.is_active_attempt(attempt) {
        return UpdateResult::none();
    }

    match event {
        SurfaceEvent::WindowOpened { url } => {
            debug!("Game opened a window: {}", url);
            UpdateResult::none()
        }
        SurfaceEvent::Exited { .. } => handle_surface_exited(state, attempt),
        SurfaceEvent::Console(_) => UpdateResult::none(),
    }
}

pub fn handle_surface_exited(state: &mut AppState, attempt: u64) -> UpdateResult {
    if !state.session.is_active_attempt(attempt) {
        debug!("Ignoring exit of stale surface (attempt {})", attempt);
        return UpdateResult::none();
    }

    info!("Game surface closed");
    state.session.active_game = None;
    state.confirm_dialog = None;
    UpdateResult::action(UpdateAction::CloseSurface)
}

pub fn handle_request_close(state: &mut AppState) -> UpdateResult {
    let Some(title) = state.session.active_title() else {
        return UpdateResult::none();
    };
    state.confirm_dialog = Some(ConfirmDialogState::close_game(title));
    UpdateResult::none()
}

pub fn handle_confirm_close(state: &mut AppState) -> UpdateResult {
    state.confirm_dialog = None;
    match state.session.active_game.take() {
        Some(game) => {
            info!("Closing '{}'", game.game.title);
            UpdateResult::action(UpdateAction::CloseSurface)
        }
        None => UpdateResult::none(),
    }
}
