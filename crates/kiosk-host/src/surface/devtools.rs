//! Popup observation over the browser's remote debugging socket.
//!
//! The browser announces its debugging endpoint on stderr. Once connected we
//! ask for target discovery and route every page opened by another page
//! through the [`WindowOpenPolicy`].

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tracing::{debug, warn};

use super::{SurfaceEvent, WindowOpenAction, WindowOpenPolicy};

/// A page opened by the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupTarget {
    pub target_id: String,
    pub url: String,
}

/// Extract a popup from a `Target.targetCreated` notification
pub fn parse_popup(text: &str) -> Option<PopupTarget> {
    let value: Value = serde_json::from_str(text).ok()?;
    if value.get("method")?.as_str()? != "Target.targetCreated" {
        return None;
    }

    let info = value.get("params")?.get("targetInfo")?;
    if info.get("type")?.as_str()? != "page" {
        return None;
    }
    // Pages without an opener are the surface itself
    info.get("openerId")?.as_str()?;

    Some(PopupTarget {
        target_id: info.get("targetId")?.as_str()?.to_string(),
        url: info
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

/// Follow the browser's targets until the socket closes
pub async fn watch_popups(
    ws_url: String,
    policy: WindowOpenPolicy,
    events: mpsc::Sender<SurfaceEvent>,
) {
    let ws_stream = match connect_async(ws_url.as_str()).await {
        Ok((ws_stream, _response)) => ws_stream,
        Err(err) => {
            warn!("Failed to attach to surface debugging socket: {}", err);
            return;
        }
    };
    let (mut ws_sink, mut ws_stream) = ws_stream.split();

    let discover = json!({
        "id": 1,
        "method": "Target.setDiscoverTargets",
        "params": { "discover": true }
    });
    if let Err(err) = ws_sink.send(WsMessage::Text(discover.to_string().into())).await {
        warn!("Failed to enable target discovery: {}", err);
        return;
    }

    let mut next_id = 2u64;
    while let Some(frame) = ws_stream.next().await {
        match frame {
            Ok(WsMessage::Text(text)) => {
                let Some(popup) = parse_popup(text.as_str()) else {
                    continue;
                };
                match policy.decide(&popup.url) {
                    WindowOpenAction::Allow => {
                        if events
                            .send(SurfaceEvent::WindowOpened { url: popup.url })
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    WindowOpenAction::Deny => {
                        let close = json!({
                            "id": next_id,
                            "method": "Target.closeTarget",
                            "params": { "targetId": popup.target_id }
                        });
                        next_id += 1;
                        if let Err(err) =
                            ws_sink.send(WsMessage::Text(close.to_string().into())).await
                        {
                            warn!("Failed to close denied window: {}", err);
                        }
                    }
                }
            }
            Ok(WsMessage::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                debug!("Surface debugging socket error: {}", err);
                break;
            }
        }
    }

    debug!("Surface debugging socket closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_popup_from_opener() {
        let text = r#"{"method":"Target.targetCreated","params":{"targetInfo":{"targetId":"T2","type":"page","title":"","url":"https://pay.example/","attached":false,"openerId":"T1"}}}"#;
        assert_eq!(
            parse_popup(text),
            Some(PopupTarget {
                target_id: "T2".into(),
                url: "https://pay.example/".into()
            })
        );
    }

    #[test]
    fn test_parse_popup_ignores_main_page() {
        let text = r#"{"method":"Target.targetCreated","params":{"targetInfo":{"targetId":"T1","type":"page","url":"https://game/"}}}"#;
        assert_eq!(parse_popup(text), None);
    }

    #[test]
    fn test_parse_popup_ignores_workers_and_responses() {
        let worker = r#"{"method":"Target.targetCreated","params":{"targetInfo":{"targetId":"W","type":"service_worker","url":"https://game/sw.js","openerId":"T1"}}}"#;
        assert_eq!(parse_popup(worker), None);
        assert_eq!(parse_popup(r#"{"id":1,"result":{}}"#), None);
        assert_eq!(parse_popup("not json"), None);
    }
}
