//! kiosk-app - Session state machine and orchestration for Kiosk Play
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! terminal session, the heartbeat timer, game surface orchestration, the
//! Engine shared by the TUI and headless runners, and configuration loading.

pub mod actions;
pub mod config;
pub mod confirm_dialog;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod heartbeat;
pub mod input_key;
pub mod message;
pub mod process;
pub mod services;
pub mod session;
pub mod signals;
pub mod state;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::{Direction, InputKey};
pub use message::Message;
pub use services::{ApiService, DeviceService, Services, SurfaceService};
pub use session::Session;
pub use state::{AppState, Screen, CATALOG_COLUMNS};
