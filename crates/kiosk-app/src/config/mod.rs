//! Configuration file parsing for Kiosk Play
//!
//! Supports `{config_dir}/kiosk-play/config.toml` (or an explicit path) with
//! command line and environment overrides for the backend URL.

pub mod settings;
pub mod types;

pub use settings::{
    apply_api_url_override, default_config_path, load_settings, load_settings_strict,
    surface_options, API_URL_ENV, CONFIG_FILENAME,
};
pub use types::*;
