//! Main TUI runner - entry point and event loop
//!
//! - `run`: builds the Engine, owns the terminal for the lifetime of the app
//! - `run_loop`: drains engine messages, renders, polls the keyboard

use tracing::{error, info};

use kiosk_app::config::Settings;
use kiosk_app::{ApiService, DeviceService, Engine, Services, SurfaceService};
use kiosk_core::Result;

use super::{event, render, terminal};

/// Run the kiosk TUI until the operator quits or a signal arrives
pub async fn run<A, D, H>(settings: Settings, services: Services<A, D, H>) -> Result<()>
where
    A: ApiService,
    D: DeviceService,
    H: SurfaceService,
{
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let mut engine = Engine::new(settings, services);

    // Initialize terminal
    let mut term = ratatui::init();

    engine.start();

    let result = run_loop(&mut term, &mut engine);
    if let Err(e) = &result {
        error!("TUI loop failed: {}", e);
    }

    // Stop the heartbeat and close any game window before giving the terminal back
    engine.shutdown().await;

    ratatui::restore();

    result
}

/// Main event loop
fn run_loop<A, D, H>(
    terminal: &mut ratatui::DefaultTerminal,
    engine: &mut Engine<A, D, H>,
) -> Result<()>
where
    A: ApiService,
    D: DeviceService,
    H: SurfaceService,
{
    while !engine.should_quit() {
        // Results of background work, signal handler
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    info!("Leaving event loop");
    Ok(())
}
