//! Full-frame rendering tests for `view`

use kiosk_app::confirm_dialog::ConfirmDialogState;
use kiosk_app::AppState;
use kiosk_core::{TerminalIdentity, TerminalStatus};

use super::view;
use crate::test_utils::{lobby_state, playing_state, TestTerminal};

fn render(state: &AppState) -> TestTerminal {
    let mut term = TestTerminal::new();
    term.draw_with(|frame| view(frame, state));
    term
}

#[test]
fn test_initial_state_shows_loading() {
    let term = render(&AppState::new());
    assert!(term.buffer_contains("LOADING..."));
    assert!(!term.buffer_contains("titles available"));
}

#[test]
fn test_loading_game_shows_connecting() {
    let mut state = lobby_state();
    state.session.begin_launch();
    let term = render(&state);
    assert!(term.buffer_contains("CONNECTING TO GAME..."));
}

#[test]
fn test_lobby_shows_header_catalog_and_footer() {
    let state = lobby_state();
    let term = render(&state);

    assert!(term.buffer_contains("KIOSKPLAY"));
    assert!(term.buffer_contains("a1b2c3d4e5f6"));
    assert!(!term.buffer_contains("a1b2c3d4e5f6a"));
    assert!(term.buffer_contains("CREDITS R$ 10,50"));
    assert!(term.buffer_contains("8 titles available"));
    assert!(term.buffer_contains("Royal 777 Deluxe"));
    assert!(term.buffer_contains("CONNECTED TO SERVER"));
    assert!(term.buffer_contains("V 1.0.0"));
}

#[test]
fn test_game_view_shows_toolbar() {
    let term = render(&playing_state());
    assert!(term.buffer_contains("Golden Empire"));
    assert!(term.buffer_contains("[X] Close game"));
    assert!(term.buffer_contains("CREDITS R$ 10,50"));
    assert!(!term.buffer_contains("titles available"));
}

#[test]
fn test_blocked_screen() {
    let mut state = lobby_state();
    state.session.block();
    state.session.device_id = Some(TerminalIdentity::new("feedface"));
    let term = render(&state);

    assert!(term.buffer_contains("TERMINAL BLOCKED"));
    assert!(term.buffer_contains("Contact the administrator"));
    assert!(term.buffer_contains("ID: feedface"));
}

#[test]
fn test_error_screen_shows_message() {
    let mut state = lobby_state();
    state
        .session
        .fail("No response from server. Is the backend running?");
    let term = render(&state);

    assert_eq!(state.session.status, TerminalStatus::Error);
    assert!(term.buffer_contains("No response from server."));
    assert!(term.buffer_contains("Press R to reload"));
}

#[test]
fn test_confirm_dialog_overlays_game() {
    let mut state = playing_state();
    state.confirm_dialog = Some(ConfirmDialogState::close_game("Golden Empire"));
    let term = render(&state);

    assert!(term.buffer_contains("Leave Golden Empire?"));
    assert!(term.buffer_contains("[ Yes (y) ]"));
}

#[test]
fn test_alert_overlays_lobby() {
    let mut state = lobby_state();
    state.show_alert("Insufficient balance to start.");
    let term = render(&state);

    assert!(term.buffer_contains("Insufficient balance to start."));
    assert!(term.buffer_contains("[Enter] OK"));
}

#[test]
fn test_compact_terminal_renders_every_screen() {
    let mut lobby = lobby_state();
    for status in [
        TerminalStatus::Loading,
        TerminalStatus::LoadingGame,
        TerminalStatus::Blocked,
        TerminalStatus::Error,
        TerminalStatus::Active,
    ] {
        lobby.session.status = status;
        let mut term = TestTerminal::compact();
        term.draw_with(|frame| view(frame, &lobby));
    }
}
