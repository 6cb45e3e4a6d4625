//! Custom widget components

mod alert;
mod catalog;
mod confirm_dialog;
mod footer;
mod game_view;
mod header;
pub mod modal_overlay;
mod status_screen;

pub use alert::AlertDialog;
pub use catalog::{CatalogGrid, CARD_HEIGHT};
pub use confirm_dialog::ConfirmDialog;
pub use footer::Footer;
pub use game_view::{GameBody, GameToolbar};
pub use header::{LobbyHeader, BRAND, SHORT_ID_LEN};
pub use status_screen::StatusScreen;

// Re-export state types from app layer (these are used by render/)
pub use kiosk_app::confirm_dialog::ConfirmDialogState;
