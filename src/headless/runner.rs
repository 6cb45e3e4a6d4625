//! Headless mode runner - main event loop without TUI

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use kiosk_app::config::Settings;
use kiosk_app::{ApiService, DeviceService, Engine, EngineEvent, Message, SurfaceService};
use kiosk_core::prelude::*;

use super::HeadlessEvent;

/// Run in headless mode - output NDJSON events instead of the TUI
pub async fn run_headless(settings: Settings) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("Kiosk Play starting in HEADLESS mode");
    info!("API base URL: {}", settings.api.base_url);
    info!("═══════════════════════════════════════════════════════");

    let services = crate::system_services(&settings)?;
    let mut engine = Engine::new(settings, services);

    // Spawn headless-specific stdin reader
    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(stdin_tx);
    });

    let result = run_engine(&mut engine, HeadlessEvent::emit).await;

    engine.shutdown().await;

    info!("Kiosk Play headless mode exiting");
    result
}

/// Drive `engine` until it quits, handing every NDJSON event to `sink`
pub async fn run_engine<A, D, H, F>(engine: &mut Engine<A, D, H>, mut sink: F) -> Result<()>
where
    A: ApiService,
    D: DeviceService,
    H: SurfaceService,
    F: FnMut(&HeadlessEvent),
{
    let mut events = engine.subscribe();

    engine.start();
    forward_events(&mut events, &mut sink);

    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        match engine.msg_rx.recv().await {
            Some(msg) => {
                engine.process_message(msg);
                forward_events(&mut events, &mut sink);
            }
            None => {
                info!("Message channel closed");
                break;
            }
        }
    }

    Ok(())
}

fn forward_events<F>(events: &mut broadcast::Receiver<EngineEvent>, sink: &mut F)
where
    F: FnMut(&HeadlessEvent),
{
    loop {
        match events.try_recv() {
            Ok(event) => {
                if let Some(headless) = HeadlessEvent::from_engine(&event) {
                    sink(&headless);
                }
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output skipped {} events", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Stdin commands: reload, close the running game, quit (blocking version)
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        match line {
            Ok(line) => {
                let trimmed = line.trim();
                let message = match trimmed {
                    "r" | "reload" => Message::Reload,
                    "x" | "close" => Message::ConfirmCloseGame,
                    "q" | "quit" => Message::Quit,
                    "" => continue,
                    _ => {
                        warn!("Unknown stdin command: {}", trimmed);
                        continue;
                    }
                };
                info!("Stdin: {:?}", message);
                let quit = matches!(message, Message::Quit);
                if msg_tx.blocking_send(message).is_err() || quit {
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin reader exiting");
}
