//! Key event handlers for each screen

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, Screen};

/// Convert key events to messages based on what is on screen
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Force quit with Ctrl+C from anywhere
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    // Overlays take the keyboard first
    if state.alert.is_some() {
        return handle_key_alert(key);
    }
    if state.confirm_dialog.is_some() {
        return handle_key_confirm_dialog(key);
    }

    match state.screen() {
        Screen::Loading | Screen::LoadingGame => None,
        Screen::Blocked | Screen::Error => handle_key_reload(key),
        Screen::Lobby => handle_key_lobby(key),
        Screen::Game => handle_key_game(key),
    }
}

fn handle_key_alert(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Esc => Some(Message::DismissAlert),
        _ => None,
    }
}

fn handle_key_confirm_dialog(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => Some(Message::ConfirmCloseGame),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::CancelCloseGame),
        _ => None,
    }
}

/// Blocked and Error screens only offer a reload
fn handle_key_reload(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('r' | 'R') => Some(Message::Reload),
        _ => None,
    }
}

fn handle_key_lobby(key: InputKey) -> Option<Message> {
    if let Some(direction) = key.as_direction() {
        return Some(Message::MoveSelection(direction));
    }
    match key {
        InputKey::Enter => Some(Message::LaunchSelected),
        _ => None,
    }
}

fn handle_key_game(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('x' | 'X') | InputKey::Esc => Some(Message::RequestCloseGame),
        _ => None,
    }
}
