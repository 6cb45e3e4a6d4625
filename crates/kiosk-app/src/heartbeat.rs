//! Heartbeat timer
//!
//! One abortable task sends a heartbeat per interval and reports each result
//! as a message. What the task sends is fixed at spawn time by a
//! [`HeartbeatPlan`]; after every update the engine derives the plan from the
//! session and [`HeartbeatController::reconcile`] restarts the task whenever
//! it changed.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use kiosk_core::GameId;

use crate::config::{BackoffMode, HeartbeatSettings};
use crate::message::Message;
use crate::services::ApiService;
use crate::session::Session;

/// Exponent cap; keeps the multiplier inside `u32`
const MAX_BACKOFF_SHIFT: u32 = 16;

/// What the running heartbeat sends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatPlan {
    pub token: String,
    pub game_id: Option<GameId>,
}

impl HeartbeatPlan {
    /// The plan the session calls for, or `None` when no heartbeat should run
    pub fn from_session(session: &Session) -> Option<Self> {
        if !session.status.is_heartbeat_eligible() {
            return None;
        }
        let token = session.auth_token.clone()?;
        Some(Self {
            token,
            game_id: session.active_game.as_ref().map(|g| g.id().clone()),
        })
    }
}

/// Delay between heartbeats
#[derive(Debug, Clone, PartialEq)]
pub struct HeartbeatSchedule {
    interval: Duration,
    jitter: Duration,
    backoff: BackoffMode,
    max_backoff: Duration,
}

impl HeartbeatSchedule {
    pub fn from_settings(settings: &HeartbeatSettings) -> Self {
        Self {
            interval: settings.interval(),
            jitter: Duration::from_millis(settings.jitter_ms),
            backoff: settings.backoff,
            max_backoff: Duration::from_millis(settings.max_backoff_ms),
        }
    }

    /// Delay before the next heartbeat, without jitter
    pub fn base_delay(&self, consecutive_failures: u32) -> Duration {
        match self.backoff {
            BackoffMode::Fixed => self.interval,
            BackoffMode::Exponential => {
                let factor = 1u32 << consecutive_failures.min(MAX_BACKOFF_SHIFT);
                let ceiling = self.max_backoff.max(self.interval);
                self.interval.saturating_mul(factor).min(ceiling)
            }
        }
    }

    pub fn next_delay(&self, consecutive_failures: u32) -> Duration {
        let base = self.base_delay(consecutive_failures);
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return base;
        }
        base + Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
    }
}

impl Default for HeartbeatSchedule {
    fn default() -> Self {
        Self::from_settings(&HeartbeatSettings::default())
    }
}

/// Owns the heartbeat task
#[derive(Debug)]
pub struct HeartbeatController {
    schedule: HeartbeatSchedule,
    plan: Option<HeartbeatPlan>,
    task: Option<JoinHandle<()>>,
}

impl HeartbeatController {
    pub fn new(schedule: HeartbeatSchedule) -> Self {
        Self {
            schedule,
            plan: None,
            task: None,
        }
    }

    pub fn plan(&self) -> Option<&HeartbeatPlan> {
        self.plan.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Bring the running task in line with `desired`
    pub fn reconcile<A: ApiService>(
        &mut self,
        desired: Option<HeartbeatPlan>,
        api: &Arc<A>,
        msg_tx: &mpsc::Sender<Message>,
    ) {
        if desired == self.plan {
            return;
        }

        self.stop();

        let Some(plan) = desired else {
            return;
        };

        match &plan.game_id {
            Some(game_id) => info!("Heartbeat running (game {})", game_id),
            None => info!("Heartbeat running"),
        }
        self.task = Some(tokio::spawn(run_heartbeat(
            Arc::clone(api),
            plan.clone(),
            self.schedule.clone(),
            msg_tx.clone(),
        )));
        self.plan = Some(plan);
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Heartbeat stopped");
            task.abort();
        }
        self.plan = None;
    }
}

impl Drop for HeartbeatController {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Heartbeat loop; ends when the message channel closes or the task is aborted
async fn run_heartbeat<A: ApiService>(
    api: Arc<A>,
    plan: HeartbeatPlan,
    schedule: HeartbeatSchedule,
    msg_tx: mpsc::Sender<Message>,
) {
    let mut failures: u32 = 0;

    loop {
        tokio::time::sleep(schedule.next_delay(failures)).await;

        let message = match api.send_heartbeat(&plan.token, plan.game_id.as_ref()).await {
            Ok(response) => {
                failures = 0;
                Message::HeartbeatSucceeded { response }
            }
            Err(error) => {
                failures = failures.saturating_add(1);
                Message::HeartbeatFailed { error }
            }
        };

        if msg_tx.send(message).await.is_err() {
            debug!("Message channel closed, heartbeat exiting");
            break;
        }
    }
}
