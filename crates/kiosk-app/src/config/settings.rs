//! Settings loading

use std::path::{Path, PathBuf};

use kiosk_core::prelude::*;
use kiosk_host::surface::{default_partition_root, SurfaceOptions};

use super::types::Settings;

pub const CONFIG_DIR_NAME: &str = "kiosk-play";
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "KIOSK_API_URL";

/// `{config_dir}/kiosk-play/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILENAME)
}

/// Load settings from `path`, falling back to defaults when the file is
/// missing or invalid
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}

/// Strict variant used when the user named the file explicitly
pub fn load_settings_strict(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply the base URL override, command line first, then environment
pub fn apply_api_url_override(settings: &mut Settings, cli_url: Option<&str>) {
    let env_url = std::env::var(API_URL_ENV).ok();
    let url = cli_url
        .map(str::to_string)
        .or(env_url)
        .filter(|u| !u.trim().is_empty());

    if let Some(url) = url {
        info!("API base URL overridden: {}", url);
        settings.api.base_url = url;
    }
}

/// Surface host options derived from settings
pub fn surface_options(settings: &Settings) -> SurfaceOptions {
    let surface = &settings.surface;
    SurfaceOptions {
        browser: surface.browser_path(),
        user_agent: surface.user_agent.clone(),
        kiosk: surface.kiosk,
        allow_popups: surface.allow_popups,
        partition_root: surface
            .partition_root_path()
            .unwrap_or_else(default_partition_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackoffMode;
    use kiosk_core::NumberStyle;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings(&dir.path().join("config.toml"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api.base_url, "http://127.0.0.1:8000/api");
        assert_eq!(settings.api.client_version, "1.0.0");
        assert_eq!(settings.heartbeat.interval_ms, 3000);
        assert_eq!(settings.heartbeat.backoff, BackoffMode::Fixed);
        assert!(settings.surface.allow_popups);
        assert_eq!(settings.ui.currency_symbol, "R$");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "http://10.0.0.2:8000/api"

[heartbeat]
interval_ms = 5000
backoff = "exponential"

[ui]
number_style = "en_us"
"#,
        )
        .unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.api.base_url, "http://10.0.0.2:8000/api");
        assert_eq!(settings.api.client_version, "1.0.0");
        assert_eq!(settings.heartbeat.interval_ms, 5000);
        assert_eq!(settings.heartbeat.backoff, BackoffMode::Exponential);
        assert_eq!(settings.heartbeat.max_backoff_ms, 30_000);
        assert_eq!(settings.ui.number_style, NumberStyle::EnUs);
        assert_eq!(settings.ui.currency_symbol, "R$");
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert_eq!(load_settings(&path), Settings::default());
        assert!(matches!(load_settings_strict(&path), Err(Error::Toml(_))));
    }

    #[test]
    fn test_strict_load_missing_file() {
        let err = load_settings_strict(Path::new("/no/such/config.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    #[serial]
    fn test_cli_override_wins_over_env() {
        std::env::set_var(API_URL_ENV, "http://env:1/api");
        let mut settings = Settings::default();
        apply_api_url_override(&mut settings, Some("http://cli:2/api"));
        assert_eq!(settings.api.base_url, "http://cli:2/api");

        let mut settings = Settings::default();
        apply_api_url_override(&mut settings, None);
        assert_eq!(settings.api.base_url, "http://env:1/api");
        std::env::remove_var(API_URL_ENV);
    }

    #[test]
    #[serial]
    fn test_no_override_keeps_configured_url() {
        std::env::remove_var(API_URL_ENV);
        let mut settings = Settings::default();
        apply_api_url_override(&mut settings, None);
        assert_eq!(settings.api.base_url, "http://127.0.0.1:8000/api");
    }

    #[test]
    fn test_surface_options_resolve_paths() {
        let mut settings = Settings::default();
        settings.surface.browser = "/usr/bin/chromium".into();
        settings.surface.partition_root = "/srv/kiosk/partitions".into();
        settings.surface.kiosk = true;

        let options = surface_options(&settings);
        assert_eq!(options.browser, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(options.partition_root, PathBuf::from("/srv/kiosk/partitions"));
        assert!(options.kiosk);

        let defaults = surface_options(&Settings::default());
        assert_eq!(defaults.browser, None);
        assert_eq!(defaults.partition_root, default_partition_root());
    }
}
