//! Confirm dialog state.
//!
//! Data model for yes/no prompts. The rendering widget lives in
//! `kiosk_tui::widgets::confirm_dialog`.

use crate::message::Message;

#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    /// Label and message for each answer, confirm first
    pub options: Vec<(String, Message)>,
}

impl ConfirmDialogState {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        options: Vec<(&str, Message)>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            options: options
                .into_iter()
                .map(|(label, msg)| (label.to_string(), msg))
                .collect(),
        }
    }

    /// Prompt shown before leaving a running game
    pub fn close_game(title: &str) -> Self {
        Self::new(
            format!("Leave {title}?"),
            "Do you really want to leave the game?",
            vec![
                ("Yes (y)", Message::ConfirmCloseGame),
                ("No (n)", Message::CancelCloseGame),
            ],
        )
    }
}
