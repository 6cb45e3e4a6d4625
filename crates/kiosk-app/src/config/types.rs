//! Configuration types for Kiosk Play
//!
//! Defines `Settings` (the `config.toml` file) and its sections.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use kiosk_core::NumberStyle;
use kiosk_host::DEFAULT_USER_AGENT;

/// Application settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub heartbeat: HeartbeatSettings,

    #[serde(default)]
    pub surface: SurfaceSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Backend connection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL all endpoints are relative to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Version reported on authentication
    #[serde(default = "default_client_version")]
    pub client_version: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_version: default_client_version(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

fn default_client_version() -> String {
    "1.0.0".to_string()
}

/// Delay growth after failed heartbeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffMode {
    /// Keep the regular interval
    #[default]
    Fixed,
    /// Double the interval per consecutive failure, up to `max_backoff_ms`
    Exponential,
}

/// Heartbeat timing
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HeartbeatSettings {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Random extra delay added to each tick, 0 to disable
    #[serde(default)]
    pub jitter_ms: u64,

    #[serde(default)]
    pub backoff: BackoffMode,

    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl Default for HeartbeatSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            jitter_ms: 0,
            backoff: BackoffMode::Fixed,
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

impl HeartbeatSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

fn default_interval_ms() -> u64 {
    3000
}

fn default_max_backoff_ms() -> u64 {
    30_000
}

/// Game surface
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SurfaceSettings {
    /// Browser executable, empty to auto-detect
    #[serde(default)]
    pub browser: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub kiosk: bool,

    #[serde(default = "default_true")]
    pub allow_popups: bool,

    /// Partition directory root, empty for the data directory default
    #[serde(default)]
    pub partition_root: String,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            browser: String::new(),
            user_agent: default_user_agent(),
            kiosk: false,
            allow_popups: true,
            partition_root: String::new(),
        }
    }
}

impl SurfaceSettings {
    pub fn browser_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.browser)
    }

    pub fn partition_root_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.partition_root)
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    (!value.is_empty()).then(|| PathBuf::from(value))
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_true() -> bool {
    true
}

/// Presentation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default)]
    pub number_style: NumberStyle,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            number_style: NumberStyle::PtBr,
        }
    }
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}
