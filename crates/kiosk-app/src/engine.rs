//! Engine - shared orchestration for the TUI and headless runners
//!
//! The Engine owns the TEA state, the message channel, the heartbeat task,
//! the game surface slot and the injected services. Frontends feed it
//! messages and render `engine.state`; external consumers subscribe to
//! [`EngineEvent`]s.

use tokio::sync::{broadcast, mpsc};
use tracing::info;

use kiosk_core::{ActiveGame, Credits, TerminalStatus};
use kiosk_host::SurfaceOptions;

use crate::actions::{load_token, surface::close_surface, SurfaceSlot};
use crate::config::{self, Settings};
use crate::engine_event::EngineEvent;
use crate::heartbeat::{HeartbeatController, HeartbeatSchedule};
use crate::message::Message;
use crate::process::{self, Runtime};
use crate::services::{ApiService, DeviceService, Services, SurfaceService};
use crate::signals;
use crate::state::AppState;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    status: TerminalStatus,
    credits: Credits,
    catalog_revision: u64,
    active_game: Option<ActiveGame>,
    alert: Option<String>,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            status: state.session.status,
            credits: state.session.credits,
            catalog_revision: state.session.catalog_revision,
            active_game: state.session.active_game.clone(),
            alert: state.alert.clone(),
        }
    }
}

/// Orchestration engine for Kiosk Play.
pub struct Engine<A, D, H> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, key reader).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Loaded settings
    pub settings: Settings,

    services: Services<A, D, H>,

    heartbeat: HeartbeatController,

    surfaces: SurfaceSlot,

    surface_options: SurfaceOptions,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl<A, D, H> Engine<A, D, H>
where
    A: ApiService,
    D: DeviceService,
    H: SurfaceService,
{
    /// Create a new Engine.
    ///
    /// Loads the persisted session token, creates the message channel
    /// (capacity 256) and spawns the signal handler. Call [`Engine::start`]
    /// to begin the startup sequence.
    pub fn new(settings: Settings, services: Services<A, D, H>) -> Self {
        let token = load_token(services.tokens.as_ref());
        if token.is_some() {
            info!("Loaded session token from previous run");
        }

        let state = AppState::with_settings(settings.clone(), token);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);

        signals::spawn_signal_handler(msg_tx.clone());

        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            heartbeat: HeartbeatController::new(HeartbeatSchedule::from_settings(
                &settings.heartbeat,
            )),
            surfaces: SurfaceSlot::new(),
            surface_options: config::surface_options(&settings),
            settings,
            services,
            event_tx,
        }
    }

    /// Run the startup sequence
    pub fn start(&mut self) {
        self.process_message(Message::Startup);
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        let mut runtime = Runtime {
            msg_tx: &self.msg_tx,
            services: &self.services,
            heartbeat: &mut self.heartbeat,
            surfaces: &self.surfaces,
            surface_options: &self.surface_options,
        };
        process::process_message(&mut self.state, msg, &mut runtime);

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Whether a heartbeat task is currently scheduled
    pub fn heartbeat_running(&self) -> bool {
        self.heartbeat.is_running()
    }

    /// Stop the heartbeat and close any open game surface
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        self.heartbeat.stop();

        if let Some(handle) = self.surfaces.release() {
            info!("Closing game surface before exit");
            close_surface(&*self.services.surface, handle).await;
        }
    }

    /// Emit EngineEvents based on state changes after processing.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre.status != post.status {
            self.emit(EngineEvent::StatusChanged {
                old: pre.status,
                new: post.status,
            });
        }

        if pre.credits != post.credits {
            self.emit(EngineEvent::CreditsUpdated {
                credits: post.credits,
            });
        }

        if pre.catalog_revision != post.catalog_revision {
            self.emit(EngineEvent::CatalogLoaded {
                count: self.state.session.catalog.len(),
                fallback: self.state.session.catalog_is_fallback,
            });
        }

        if pre.active_game != post.active_game {
            if let Some(closed) = &pre.active_game {
                self.emit(EngineEvent::GameClosed {
                    game_id: closed.id().clone(),
                });
            }
            if let Some(opened) = &post.active_game {
                self.emit(EngineEvent::GameOpened {
                    game: opened.clone(),
                });
            }
        }

        if let Some(message) = &post.alert {
            if pre.alert.as_ref() != Some(message) {
                self.emit(EngineEvent::Alert {
                    message: message.clone(),
                });
            }
        }
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use kiosk_host::test_utils::{FakeHostInfo, FakeKioskApi, RecordingSurfaceHost};
    use kiosk_host::{HostBridge, MemoryTokenStore, TokenStore};

    type TestEngine = Engine<FakeKioskApi, HostBridge<FakeHostInfo>, RecordingSurfaceHost>;

    fn test_engine(api: FakeKioskApi, tokens: Arc<dyn TokenStore>) -> TestEngine {
        let services = Services::new(
            api,
            HostBridge::new(FakeHostInfo::new(Some("DISK"), Some("UUID"))),
            RecordingSurfaceHost::new(),
            tokens,
        );
        Engine::new(Settings::default(), services)
    }

    /// Receive and process messages until `done` holds
    async fn run_until(engine: &mut TestEngine, done: impl Fn(&AppState) -> bool) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while !done(&engine.state) {
            let msg = tokio::time::timeout_at(deadline, engine.msg_rx.recv())
                .await
                .expect("condition not reached in time")
                .expect("channel open");
            engine.process_message(msg);
        }
    }

    #[tokio::test]
    async fn test_engine_new_loads_persisted_token() {
        let engine = test_engine(
            FakeKioskApi::new(),
            Arc::new(MemoryTokenStore::with_token("OLD")),
        );
        assert_eq!(engine.state.session.auth_token.as_deref(), Some("OLD"));
        assert!(!engine.should_quit());
    }

    #[tokio::test]
    async fn test_engine_drain_empty_channel() {
        let mut engine = test_engine(FakeKioskApi::new(), Arc::new(MemoryTokenStore::new()));
        assert_eq!(engine.drain_pending_messages(), 0);
    }

    #[tokio::test]
    async fn test_engine_process_quit_message() {
        let mut engine = test_engine(FakeKioskApi::new(), Arc::new(MemoryTokenStore::new()));
        engine.process_message(Message::Quit);
        assert!(engine.should_quit());
    }

    #[tokio::test]
    async fn test_startup_authenticates_and_persists_token() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let mut engine = test_engine(FakeKioskApi::new(), tokens.clone());
        let mut events = engine.subscribe();

        engine.start();
        run_until(&mut engine, |s| s.session.catalog_revision > 0).await;

        assert_eq!(engine.state.session.status, TerminalStatus::Active);
        assert!(engine.heartbeat_running());
        assert!(matches!(
            events.recv().await,
            Ok(EngineEvent::StatusChanged {
                old: TerminalStatus::Loading,
                new: TerminalStatus::Active
            })
        ));

        // Token save happens on a blocking task
        for _ in 0..100 {
            if tokens.load().unwrap().is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(tokens.load().unwrap().as_deref(), Some("test-token"));
    }

    #[tokio::test]
    async fn test_blocked_startup_has_no_heartbeat() {
        let api = FakeKioskApi::new().with_auth(Err(kiosk_host::test_utils::forbidden()));
        let mut engine = test_engine(api, Arc::new(MemoryTokenStore::new()));

        engine.start();
        run_until(&mut engine, |s| s.session.status == TerminalStatus::Blocked).await;

        assert!(!engine.heartbeat_running());
    }

    #[tokio::test]
    async fn test_subscribe_receives_shutdown_event() {
        let mut engine = test_engine(FakeKioskApi::new(), Arc::new(MemoryTokenStore::new()));
        let mut rx = engine.subscribe();

        engine.shutdown().await;

        match tokio::time::timeout(Duration::from_millis(100), rx.recv()).await {
            Ok(Ok(event)) => assert_eq!(event, EngineEvent::Shutdown),
            _ => panic!("Should have received shutdown event"),
        }
    }

    #[test]
    fn test_state_snapshot_capture() {
        let state = AppState::new();
        let snapshot = StateSnapshot::capture(&state);
        assert_eq!(snapshot.status, TerminalStatus::Loading);
        assert_eq!(snapshot.catalog_revision, 0);
        assert!(snapshot.active_game.is_none());
    }
}
