//! Game surface lifecycle
//!
//! The update function only decides *that* a surface should be open for a
//! launch attempt; the [`SurfaceSlot`] tracks the handle that makes it so.
//! Opening is asynchronous, so a close can arrive before the open finishes:
//! handles installed for an attempt that is no longer wanted are closed
//! immediately.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use kiosk_core::ActiveGame;
use kiosk_host::{SurfaceEvent, SurfaceHandle, SurfaceOptions, SurfaceSpec};

use crate::message::Message;
use crate::services::SurfaceService;

/// Buffer for events from one surface
const SURFACE_EVENT_BUFFER: usize = 64;

#[derive(Debug, Default)]
struct SlotState {
    /// Attempt whose surface should be showing
    wanted: Option<u64>,
    /// Surface currently open, with its attempt
    open: Option<(u64, SurfaceHandle)>,
}

/// Shared record of the open game surface
#[derive(Debug, Clone, Default)]
pub struct SurfaceSlot {
    state: Arc<Mutex<SlotState>>,
}

impl SurfaceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mark `attempt` as wanted; returns a surface left open by an earlier attempt
    pub fn want(&self, attempt: u64) -> Option<SurfaceHandle> {
        let mut state = self.lock();
        state.wanted = Some(attempt);
        match state.open.take() {
            Some((open_attempt, handle)) if open_attempt != attempt => Some(handle),
            other => {
                state.open = other;
                None
            }
        }
    }

    /// Store a freshly opened surface; returns whatever must be closed instead
    pub fn install(&self, attempt: u64, handle: SurfaceHandle) -> Option<SurfaceHandle> {
        let mut state = self.lock();
        if state.wanted != Some(attempt) {
            debug!("Surface for attempt {} is no longer wanted", attempt);
            return Some(handle);
        }
        state
            .open
            .replace((attempt, handle))
            .map(|(_, previous)| previous)
    }

    /// Nothing is wanted any more; returns the open surface, if any
    pub fn release(&self) -> Option<SurfaceHandle> {
        let mut state = self.lock();
        state.wanted = None;
        state.open.take().map(|(_, handle)| handle)
    }

    pub fn open_attempt(&self) -> Option<u64> {
        self.lock().open.as_ref().map(|(attempt, _)| *attempt)
    }
}

/// Open the surface for `game` in the background
pub(super) fn spawn_open<H: SurfaceService>(
    game: ActiveGame,
    host: Arc<H>,
    slot: &SurfaceSlot,
    options: &SurfaceOptions,
    msg_tx: mpsc::Sender<Message>,
) {
    let attempt = game.attempt;
    let previous = slot.want(attempt);
    let spec = SurfaceSpec::for_game(&game, options);
    let slot = slot.clone();

    tokio::spawn(async move {
        if let Some(previous) = previous {
            close_surface(&*host, previous).await;
        }

        let (event_tx, event_rx) = mpsc::channel(SURFACE_EVENT_BUFFER);
        match host.open(spec, event_tx).await {
            Ok(handle) => {
                info!("Game surface open (attempt {})", attempt);
                spawn_event_forwarder(attempt, event_rx, msg_tx);
                if let Some(stale) = slot.install(attempt, handle) {
                    close_surface(&*host, stale).await;
                }
            }
            Err(e) => {
                warn!("Failed to open game surface: {}", e);
                let _ = msg_tx
                    .send(Message::SurfaceFailed {
                        attempt,
                        message: e.to_string(),
                    })
                    .await;
            }
        }
    });
}

/// Close the open surface, if any, in the background
pub(super) fn spawn_close<H: SurfaceService>(host: Arc<H>, slot: &SurfaceSlot) {
    if let Some(handle) = slot.release() {
        tokio::spawn(async move {
            close_surface(&*host, handle).await;
        });
    }
}

pub(crate) async fn close_surface<H: SurfaceService>(host: &H, handle: SurfaceHandle) {
    if let Err(e) = host.close(handle).await {
        warn!("Failed to close game surface: {}", e);
    }
}

/// Relay surface events for `attempt` into the message channel
fn spawn_event_forwarder(
    attempt: u64,
    mut events: mpsc::Receiver<SurfaceEvent>,
    msg_tx: mpsc::Sender<Message>,
) {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let msg = match event {
                SurfaceEvent::Exited { code } => {
                    debug!("Surface for attempt {} exited ({:?})", attempt, code);
                    Message::SurfaceExited { attempt }
                }
                // Already forwarded to the log by the host
                SurfaceEvent::Console(_) => continue,
                event => Message::Surface { attempt, event },
            };
            if msg_tx.send(msg).await.is_err() {
                break;
            }
        }
    });
}
