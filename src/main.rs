//! Kiosk Play - self-service gaming terminal client
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use kiosk_app::config::{self, Settings};
use kiosk_core::prelude::*;

/// Kiosk Play - self-service gaming terminal client
#[derive(Parser, Debug)]
#[command(name = "kioskplay")]
#[command(about = "Self-service gaming terminal client", long_about = None)]
struct Args {
    /// Path to config.toml (default: the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the config file and KIOSK_API_URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Run in headless mode (NDJSON events on stdout, no TUI)
    #[arg(long)]
    headless: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since the TUI owns stdout)
    kiosk_core::logging::init()?;

    let settings = load_settings(&args)?;

    if args.headless {
        kiosk_play::run_headless(settings).await
    } else {
        kiosk_play::run(settings).await
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        // A file named on the command line must exist and parse
        Some(path) => config::load_settings_strict(path)?,
        None => config::load_settings(&config::default_config_path()),
    };
    config::apply_api_url_override(&mut settings, args.api_url.as_deref());
    Ok(settings)
}
