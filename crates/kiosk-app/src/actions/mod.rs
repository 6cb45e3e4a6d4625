//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use kiosk_core::Game;
use kiosk_host::{SurfaceOptions, TokenStore};

use crate::handler::UpdateAction;
use crate::message::Message;
use crate::services::{ApiService, DeviceService, Services, SurfaceService};

pub mod surface;
pub use surface::SurfaceSlot;

/// Execute an action by spawning a background task
pub fn handle_action<A, D, H>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    services: &Services<A, D, H>,
    surfaces: &SurfaceSlot,
    surface_options: &SurfaceOptions,
) where
    A: ApiService,
    D: DeviceService,
    H: SurfaceService,
{
    match action {
        UpdateAction::RunStartup { client_version } => {
            let device = Arc::clone(&services.device);
            let api = Arc::clone(&services.api);
            tokio::spawn(async move {
                run_startup(&*device, &*api, &client_version, msg_tx).await;
            });
        }

        UpdateAction::FetchCatalog { token } => {
            let api = Arc::clone(&services.api);
            tokio::spawn(async move {
                let msg = match api.fetch_catalog(&token).await {
                    Ok(games) => Message::CatalogLoaded { games },
                    Err(error) => Message::CatalogFailed { error },
                };
                let _ = msg_tx.send(msg).await;
            });
        }

        UpdateAction::SaveToken { token } => {
            let tokens = Arc::clone(&services.tokens);
            tokio::task::spawn_blocking(move || save_token(tokens.as_ref(), &token));
        }

        UpdateAction::StartGame {
            attempt,
            token,
            game,
        } => {
            let api = Arc::clone(&services.api);
            tokio::spawn(async move {
                let msg = start_game(&*api, attempt, &token, game).await;
                let _ = msg_tx.send(msg).await;
            });
        }

        UpdateAction::OpenSurface { game } => {
            surface::spawn_open(
                game,
                Arc::clone(&services.surface),
                surfaces,
                surface_options,
                msg_tx,
            );
        }

        UpdateAction::CloseSurface => {
            surface::spawn_close(Arc::clone(&services.surface), surfaces);
        }
    }
}

/// Resolve the identity, report it, then authenticate with it
async fn run_startup<D: DeviceService, A: ApiService>(
    device: &D,
    api: &A,
    client_version: &str,
    msg_tx: mpsc::Sender<Message>,
) {
    let identity = device.get_device_id().await;
    let device_id = identity.as_str().to_string();

    if msg_tx
        .send(Message::DeviceIdResolved { identity })
        .await
        .is_err()
    {
        debug!("Message channel closed during startup");
        return;
    }

    let msg = match api.authenticate(&device_id, client_version).await {
        Ok(response) => Message::AuthSucceeded { response },
        Err(error) => Message::AuthFailed { error },
    };
    let _ = msg_tx.send(msg).await;
}

async fn start_game<A: ApiService>(api: &A, attempt: u64, token: &str, game: Game) -> Message {
    let slug = game.launch_key();
    debug!("Requesting game URL for {} (attempt {})", slug, attempt);

    match api.start_game(token, &slug).await {
        Ok(response) => Message::GameStarted {
            attempt,
            game,
            url: response.url,
        },
        Err(error) => Message::GameStartFailed { attempt, error },
    }
}

fn save_token(tokens: &dyn TokenStore, token: &str) {
    match tokens.save(token) {
        Ok(()) => info!("Session token saved"),
        Err(e) => error!("Failed to save session token: {}", e),
    }
}

/// Token from the previous run, if any
pub fn load_token(tokens: &dyn TokenStore) -> Option<String> {
    match tokens.load() {
        Ok(token) => token,
        Err(e) => {
            warn!("Failed to load session token: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::{GameId, TerminalIdentity};
    use kiosk_host::storage::MockTokenStore;
    use kiosk_host::test_utils::{forbidden, ApiCall, FakeKioskApi};
    use kiosk_host::{DeviceIdSource, MemoryTokenStore};

    struct FixedDevice;

    impl DeviceIdSource for FixedDevice {
        async fn get_device_id(&self) -> TerminalIdentity {
            TerminalIdentity::new("abc123")
        }
    }

    #[tokio::test]
    async fn test_startup_reports_identity_then_auth() {
        let api = FakeKioskApi::new();
        let (tx, mut rx) = mpsc::channel(4);

        run_startup(&FixedDevice, &api, "1.0.0", tx).await;

        assert!(matches!(
            rx.recv().await,
            Some(Message::DeviceIdResolved { ref identity }) if identity.as_str() == "abc123"
        ));
        assert!(matches!(
            rx.recv().await,
            Some(Message::AuthSucceeded { .. })
        ));
        assert_eq!(
            api.calls(),
            vec![ApiCall::Authenticate {
                device_id: "abc123".into(),
                version: "1.0.0".into()
            }]
        );
    }

    #[tokio::test]
    async fn test_startup_reports_auth_failure() {
        let api = FakeKioskApi::new().with_auth(Err(forbidden()));
        let (tx, mut rx) = mpsc::channel(4);

        run_startup(&FixedDevice, &api, "1.0.0", tx).await;

        rx.recv().await;
        match rx.recv().await {
            Some(Message::AuthFailed { error }) => assert!(error.is_forbidden()),
            other => panic!("expected AuthFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_start_game_sends_launch_key() {
        let api = FakeKioskApi::new();
        let game = Game::new(3, "Golden Empire").with_slug("golden-empire");

        let msg = start_game(&api, 4, "T1", game).await;

        assert!(matches!(msg, Message::GameStarted { attempt: 4, .. }));
        assert_eq!(
            api.start_game_calls(),
            vec![ApiCall::StartGame {
                token: "T1".into(),
                game_slug: GameId::Text("golden-empire".into())
            }]
        );
    }

    #[test]
    fn test_save_token_writes_store() {
        let store = MemoryTokenStore::new();
        save_token(&store, "T1");
        assert_eq!(load_token(&store), Some("T1".to_string()));
    }

    #[test]
    fn test_load_token_failure_is_none() {
        let mut store = MockTokenStore::new();
        store
            .expect_load()
            .returning(|| Err(kiosk_core::Error::storage("/x", "denied")));
        assert_eq!(load_token(&store), None);
    }
}
