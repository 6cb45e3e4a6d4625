//! Message processing
//!
//! Runs messages through the TEA update function, dispatches the resulting
//! actions, and keeps the heartbeat task in line with the session.

use tokio::sync::mpsc;

use kiosk_host::SurfaceOptions;

use crate::actions::{handle_action, SurfaceSlot};
use crate::handler;
use crate::heartbeat::{HeartbeatController, HeartbeatPlan};
use crate::message::Message;
use crate::services::{ApiService, DeviceService, Services, SurfaceService};
use crate::state::AppState;

/// Everything the processing loop drives besides the state itself
pub struct Runtime<'a, A, D, H> {
    pub msg_tx: &'a mpsc::Sender<Message>,
    pub services: &'a Services<A, D, H>,
    pub heartbeat: &'a mut HeartbeatController,
    pub surfaces: &'a SurfaceSlot,
    pub surface_options: &'a SurfaceOptions,
}

/// Process a message through the TEA update function
pub fn process_message<A, D, H>(
    state: &mut AppState,
    message: Message,
    runtime: &mut Runtime<'_, A, D, H>,
) where
    A: ApiService,
    D: DeviceService,
    H: SurfaceService,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(
                action,
                runtime.msg_tx.clone(),
                runtime.services,
                runtime.surfaces,
                runtime.surface_options,
            );
        }

        runtime.heartbeat.reconcile(
            HeartbeatPlan::from_session(&state.session),
            &runtime.services.api,
            runtime.msg_tx,
        );

        // Continue with follow-up message
        msg = result.message;
    }
}
