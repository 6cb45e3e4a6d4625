//! Kiosk Play Library
//!
//! Wires the concrete host services into the engine and exposes the two
//! frontends: the terminal UI and the headless NDJSON runner.

pub mod headless;

use std::sync::Arc;

use kiosk_app::config::{self, Settings};
use kiosk_app::Services;
use kiosk_core::prelude::*;
use kiosk_host::{
    BrowserSurfaceHost, FileTokenStore, HostBridge, HttpKioskClient, SystemHostInfo,
    WindowOpenPolicy,
};

pub use headless::runner::run_headless;

/// Services backed by the real backend, hardware and browser
pub type SystemServices = Services<HttpKioskClient, HostBridge<SystemHostInfo>, BrowserSurfaceHost>;

/// Build the production services from settings
pub fn system_services(settings: &Settings) -> Result<SystemServices> {
    let api = HttpKioskClient::new(&settings.api.base_url).map_err(|e| {
        Error::config(format!(
            "invalid API base URL '{}': {}",
            settings.api.base_url, e
        ))
    })?;

    let options = config::surface_options(settings);
    let surface = BrowserSurfaceHost::new(
        options.browser,
        WindowOpenPolicy::new(options.allow_popups),
    );

    let tokens = FileTokenStore::new(FileTokenStore::default_path());
    debug!("Session token file: {}", tokens.path().display());

    Ok(Services::new(
        api,
        HostBridge::system(),
        surface,
        Arc::new(tokens),
    ))
}

/// Run the terminal UI
pub async fn run(settings: Settings) -> Result<()> {
    info!("API base URL: {}", settings.api.base_url);

    let services = system_services(&settings)?;
    let result = kiosk_tui::run(settings, services).await;

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("Kiosk Play exiting");
    result
}
