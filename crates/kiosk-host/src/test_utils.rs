//! Test utilities for host integration
//!
//! Scripted stand-ins for the backend, the hardware, and the browser, for use
//! in this crate's tests and (behind the `test-helpers` feature) in downstream
//! crates.

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot, Notify};

use kiosk_core::prelude::*;
use kiosk_core::{Game, GameId, KioskProfile};

use crate::api::{ApiError, ApiResult, AuthResponse, HeartbeatResponse, KioskApi, StartGameResponse};
use crate::identity::HostInfoCollector;
use crate::surface::{SurfaceEvent, SurfaceHandle, SurfaceHost, SurfaceSpec};

// ─────────────────────────────────────────────────────────────────────────────
// Host facts
// ─────────────────────────────────────────────────────────────────────────────

/// Host facts with fixed values or failures
#[derive(Debug, Clone, Default)]
pub struct FakeHostInfo {
    disk: Option<String>,
    uuid: Option<String>,
    fail_disk: bool,
    fail_uuid: bool,
}

impl FakeHostInfo {
    pub fn new(disk: Option<&str>, uuid: Option<&str>) -> Self {
        Self {
            disk: disk.map(str::to_string),
            uuid: uuid.map(str::to_string),
            ..Self::default()
        }
    }

    /// Every query fails
    pub fn failing() -> Self {
        Self {
            fail_disk: true,
            fail_uuid: true,
            ..Self::default()
        }
    }

    pub fn failing_uuid(mut self) -> Self {
        self.fail_uuid = true;
        self
    }
}

impl HostInfoCollector for FakeHostInfo {
    async fn disk_serial(&self) -> Result<Option<String>> {
        if self.fail_disk {
            return Err(Error::identity("disk query failed"));
        }
        Ok(self.disk.clone())
    }

    async fn system_uuid(&self) -> Result<Option<String>> {
        if self.fail_uuid {
            return Err(Error::identity("uuid query failed"));
        }
        Ok(self.uuid.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend
// ─────────────────────────────────────────────────────────────────────────────

/// A recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Authenticate { device_id: String, version: String },
    FetchCatalog { token: String },
    Heartbeat { token: String, current_game_id: Option<GameId> },
    StartGame { token: String, game_slug: GameId },
}

#[derive(Debug)]
struct FakeApiState {
    auth: ApiResult<AuthResponse>,
    catalog: ApiResult<Vec<Game>>,
    /// Consumed in order; `heartbeat_default` answers once empty
    heartbeats: VecDeque<ApiResult<HeartbeatResponse>>,
    heartbeat_default: ApiResult<HeartbeatResponse>,
    start_game: ApiResult<StartGameResponse>,
    calls: Vec<ApiCall>,
}

/// Scripted backend that records every call
#[derive(Debug, Clone)]
pub struct FakeKioskApi {
    state: Arc<Mutex<FakeApiState>>,
}

impl Default for FakeKioskApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeKioskApi {
    /// Accepts authentication with token `test-token` and a balance of 10.00
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeApiState {
                auth: Ok(auth_response("test-token", json!(10.0))),
                catalog: Ok(Vec::new()),
                heartbeats: VecDeque::new(),
                heartbeat_default: Ok(HeartbeatResponse::default()),
                start_game: Ok(StartGameResponse {
                    url: "https://games.test/play?session=1".to_string(),
                }),
                calls: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FakeApiState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn with_auth(self, result: ApiResult<AuthResponse>) -> Self {
        self.lock().auth = result;
        self
    }

    pub fn with_catalog(self, result: ApiResult<Vec<Game>>) -> Self {
        self.lock().catalog = result;
        self
    }

    pub fn with_start_game(self, result: ApiResult<StartGameResponse>) -> Self {
        self.lock().start_game = result;
        self
    }

    /// Answer used for heartbeats once the queue is empty
    pub fn with_heartbeat_default(self, result: ApiResult<HeartbeatResponse>) -> Self {
        self.lock().heartbeat_default = result;
        self
    }

    pub fn push_heartbeat(&self, result: ApiResult<HeartbeatResponse>) {
        self.lock().heartbeats.push_back(result);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn heartbeat_calls(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, ApiCall::Heartbeat { .. }))
            .collect()
    }

    pub fn start_game_calls(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, ApiCall::StartGame { .. }))
            .collect()
    }
}

impl KioskApi for FakeKioskApi {
    async fn authenticate(&self, device_id: &str, version: &str) -> ApiResult<AuthResponse> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Authenticate {
            device_id: device_id.to_string(),
            version: version.to_string(),
        });
        state.auth.clone()
    }

    async fn fetch_catalog(&self, token: &str) -> ApiResult<Vec<Game>> {
        let mut state = self.lock();
        state.calls.push(ApiCall::FetchCatalog {
            token: token.to_string(),
        });
        state.catalog.clone()
    }

    async fn send_heartbeat(
        &self,
        token: &str,
        current_game_id: Option<&GameId>,
    ) -> ApiResult<HeartbeatResponse> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Heartbeat {
            token: token.to_string(),
            current_game_id: current_game_id.cloned(),
        });
        match state.heartbeats.pop_front() {
            Some(result) => result,
            None => state.heartbeat_default.clone(),
        }
    }

    async fn start_game(&self, token: &str, game_slug: &GameId) -> ApiResult<StartGameResponse> {
        let mut state = self.lock();
        state.calls.push(ApiCall::StartGame {
            token: token.to_string(),
            game_slug: game_slug.clone(),
        });
        state.start_game.clone()
    }
}

/// Successful authentication body
pub fn auth_response(token: &str, credits: Value) -> AuthResponse {
    AuthResponse {
        token: token.to_string(),
        kiosk: KioskProfile {
            credits,
            ..KioskProfile::default()
        },
    }
}

/// Heartbeat body carrying a balance and optional command
pub fn heartbeat_response(credits: Value, command: Option<&str>) -> HeartbeatResponse {
    HeartbeatResponse {
        credits,
        command: command.map_or(Value::Null, |c| Value::String(c.to_string())),
    }
}

/// A 403 from the backend
pub fn forbidden() -> ApiError {
    ApiError::status(403, Some(json!({"error": "Terminal blocked"})))
}

// ─────────────────────────────────────────────────────────────────────────────
// Surface
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct SurfaceRecord {
    opened: Vec<SurfaceSpec>,
    closed: usize,
    events: Option<mpsc::Sender<SurfaceEvent>>,
    fail_open: bool,
}

/// Surface host that records specs instead of spawning a browser
#[derive(Debug, Clone, Default)]
pub struct RecordingSurfaceHost {
    record: Arc<Mutex<SurfaceRecord>>,
}

impl RecordingSurfaceHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `open` fails as if no browser were installed
    pub fn failing() -> Self {
        let host = Self::default();
        host.lock().fail_open = true;
        host
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceRecord> {
        self.record.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn opened(&self) -> Vec<SurfaceSpec> {
        self.lock().opened.clone()
    }

    pub fn closed(&self) -> usize {
        self.lock().closed
    }

    /// Report that the most recently opened surface went away
    pub async fn simulate_exit(&self) {
        let events = self.lock().events.clone();
        if let Some(events) = events {
            let _ = events.send(SurfaceEvent::Exited { code: Some(0) }).await;
        }
    }
}

impl SurfaceHost for RecordingSurfaceHost {
    async fn open(
        &self,
        spec: SurfaceSpec,
        events: mpsc::Sender<SurfaceEvent>,
    ) -> Result<SurfaceHandle> {
        let mut record = self.lock();
        if record.fail_open {
            return Err(Error::BrowserNotFound);
        }
        record.opened.push(spec);
        record.events = Some(events);

        let (kill_tx, _kill_rx) = oneshot::channel();
        Ok(SurfaceHandle::new(
            None,
            kill_tx,
            Arc::new(AtomicBool::new(false)),
            Arc::new(Notify::new()),
        ))
    }

    async fn close(&self, handle: SurfaceHandle) -> Result<()> {
        self.lock().closed += 1;
        drop(handle);
        Ok(())
    }
}
