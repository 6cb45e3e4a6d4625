//! Startup handlers: identity, authentication and catalog

use kiosk_core::{Game, TerminalIdentity, TerminalStatus};
use kiosk_host::{ApiError, AuthResponse};
use tracing::{debug, info, warn};

use crate::message::Message;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

/// First boot; only meaningful while still loading
pub fn handle_startup(state: &mut AppState) -> UpdateResult {
    if state.session.status != TerminalStatus::Loading {
        debug!("Startup ignored in status {}", state.session.status);
        return UpdateResult::none();
    }
    run_startup(state)
}

/// Leave Blocked/Error and authenticate again
pub fn handle_reload(state: &mut AppState) -> UpdateResult {
    if !state.session.status.requires_reload() {
        debug!("Reload ignored in status {}", state.session.status);
        return UpdateResult::none();
    }
    info!("Reloading terminal from {}", state.session.status);
    state.session.reset_for_reload();
    state.confirm_dialog = None;
    run_startup(state)
}

fn run_startup(state: &AppState) -> UpdateResult {
    UpdateResult::action(UpdateAction::RunStartup {
        client_version: state.settings.api.client_version.clone(),
    })
}

pub fn handle_device_id_resolved(state: &mut AppState, identity: TerminalIdentity) -> UpdateResult {
    if identity.is_degraded() {
        warn!("Terminal identity derived from incomplete host facts");
    }
    info!("Terminal identity: {}", identity.short(12));
    state.session.device_id = Some(identity);
    UpdateResult::none()
}

pub fn handle_auth_succeeded(state: &mut AppState, response: AuthResponse) -> UpdateResult {
    if state.session.status != TerminalStatus::Loading {
        debug!("Dropping authentication result in status {}", state.session.status);
        return UpdateResult::none();
    }

    let token_changed = state.session.auth_token.as_deref() != Some(response.token.as_str());
    let token = response.token.clone();

    state.session.establish(response);
    info!(
        "Terminal authenticated, balance {}",
        state.session.credits.format(state.settings.ui.number_style)
    );

    let result = UpdateResult::action(UpdateAction::FetchCatalog {
        token: token.clone(),
    });
    if token_changed {
        result.with_message(Message::PersistToken { token })
    } else {
        result
    }
}

pub fn handle_auth_failed(state: &mut AppState, error: ApiError) -> UpdateResult {
    if state.session.status != TerminalStatus::Loading {
        debug!("Dropping authentication failure in status {}", state.session.status);
        return UpdateResult::none();
    }

    if error.is_forbidden() {
        warn!("Terminal blocked by the backend");
        state.session.block();
    } else {
        let message = error.startup_message();
        warn!("Authentication failed: {}", message);
        state.session.fail(message);
    }
    UpdateResult::none()
}

pub fn handle_persist_token(token: String) -> UpdateResult {
    UpdateResult::action(UpdateAction::SaveToken { token })
}

pub fn handle_catalog_loaded(state: &mut AppState, games: Vec<Game>) -> UpdateResult {
    if games.is_empty() {
        info!("Backend returned an empty catalog, using built-in titles");
    } else {
        info!("Loaded {} titles", games.len());
    }
    state.session.replace_catalog(games);
    state.lobby.clamp(state.session.catalog.len());
    UpdateResult::none()
}

pub fn handle_catalog_failed(state: &mut AppState, error: ApiError) -> UpdateResult {
    warn!("Catalog unavailable ({}), using built-in titles", error);
    state.session.use_fallback_catalog();
    state.lobby.clamp(state.session.catalog.len());
    UpdateResult::none()
}
