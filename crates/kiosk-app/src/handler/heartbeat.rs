//! Heartbeat results and remote commands

use kiosk_host::{ApiError, HeartbeatResponse, RemoteCommand};
use tracing::{debug, info, warn};

use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

pub fn handle_heartbeat_succeeded(
    state: &mut AppState,
    response: HeartbeatResponse,
) -> UpdateResult {
    // A late answer must not revive a blocked or failed terminal
    if !state.session.status.is_heartbeat_eligible() {
        debug!("Dropping heartbeat in status {}", state.session.status);
        return UpdateResult::none();
    }

    if state.session.overwrite_credits(response.credits()) {
        debug!(
            "Balance updated to {}",
            state.session.credits.format(state.settings.ui.number_style)
        );
    }

    match response.command() {
        Some(RemoteCommand::LockScreen) => {
            warn!("Lock command received, blocking terminal");
            state.session.block();
            state.confirm_dialog = None;
            UpdateResult::action(UpdateAction::CloseSurface)
        }
        Some(RemoteCommand::Unknown(command)) => {
            info!("Ignoring unknown remote command: {}", command);
            UpdateResult::none()
        }
        None => UpdateResult::none(),
    }
}

pub fn handle_heartbeat_failed(state: &mut AppState, error: ApiError) -> UpdateResult {
    if !state.session.status.is_heartbeat_eligible() {
        return UpdateResult::none();
    }

    if error.is_unauthorized() {
        warn!("Session token rejected by heartbeat");
        state.session.fail(error.startup_message());
        state.confirm_dialog = None;
        return UpdateResult::action(UpdateAction::CloseSurface);
    }

    warn!("Heartbeat failed: {}", error);
    UpdateResult::none()
}
