//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `startup`: Identity, authentication and catalog results
//! - `heartbeat`: Heartbeat results and remote commands
//! - `launch`: Game launch, surface lifecycle and close confirmation
//! - `keys`: Key event handlers per screen

pub(crate) mod heartbeat;
pub(crate) mod keys;
pub(crate) mod launch;
pub(crate) mod startup;
pub(crate) mod update;


use kiosk_core::{ActiveGame, Game};

use crate::message::Message;

// Re-export main entry point
pub use update::update;

pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Resolve the terminal identity, then authenticate
    RunStartup { client_version: String },

    /// Load the catalog with the session token
    FetchCatalog { token: String },

    /// Persist the session token
    SaveToken { token: String },

    /// Ask the backend for a game URL
    StartGame {
        attempt: u64,
        token: String,
        game: Game,
    },

    /// Show the launched game
    OpenSurface { game: ActiveGame },

    /// Tear down the current game surface, if any
    CloseSurface,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn with_message(mut self, msg: Message) -> Self {
        self.message = Some(msg);
        self
    }
}
