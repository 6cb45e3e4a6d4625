//! HttpKioskClient against a minimal in-process HTTP server

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use kiosk_core::{Credits, GameId};
use kiosk_host::{ApiError, HttpKioskClient, KioskApi, RemoteCommand};

#[derive(Debug, Clone)]
struct RecordedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl RecordedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    /// Serve the given `(status, body)` pairs, one per connection, in order
    async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                serve_one(stream, status, body, &recorded).await;
            }
        });

        Self {
            base_url: format!("http://{addr}/api"),
            requests,
        }
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Read one request, record it, then answer
async fn serve_one(
    mut stream: TcpStream,
    status: u16,
    body: &str,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let request_body = String::from_utf8_lossy(&buf[header_end..]).to_string();
    recorded.lock().unwrap().push(RecordedRequest {
        request_line,
        headers,
        body: request_body,
    });

    let response = format!(
        "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await.unwrap();
    stream.shutdown().await.ok();
}

#[tokio::test]
async fn test_authenticate_posts_identity_and_version() {
    let server = MockServer::start(vec![(
        200,
        r#"{"token":"abc123","kiosk":{"credits":"25.50","name":"Loja 1"}}"#,
    )])
    .await;
    let client = HttpKioskClient::new(&server.base_url).unwrap();

    let auth = client.authenticate("deadbeef", "1.0.0").await.unwrap();
    assert_eq!(auth.token, "abc123");
    assert_eq!(auth.kiosk.credits(), Some(Credits::from_cents(2550)));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].request_line, "POST /api/kiosk/auth HTTP/1.1");
    assert_eq!(
        requests[0].json(),
        json!({"device_id": "deadbeef", "version": "1.0.0"})
    );
    assert_eq!(requests[0].header("accept"), Some("application/json"));
    assert!(requests[0].header("authorization").is_none());
}

#[tokio::test]
async fn test_fetch_catalog_uses_bearer_token() {
    let server = MockServer::start(vec![(
        200,
        r##"[{"id":1,"title":"Royal 777 Deluxe","type":"SLOT","color":"#FFD700"},{"id":"x9","title":"Ox","slug":"fortune-ox"}]"##,
    )])
    .await;
    let client = HttpKioskClient::new(&server.base_url).unwrap();

    let games = client.fetch_catalog("tok").await.unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[1].launch_key(), GameId::Text("fortune-ox".into()));

    let requests = server.requests();
    assert_eq!(requests[0].request_line, "GET /api/kiosk/games HTTP/1.1");
    assert_eq!(requests[0].header("authorization"), Some("Bearer tok"));
}

#[tokio::test]
async fn test_fetch_catalog_skips_malformed_entry() {
    let server = MockServer::start(vec![(
        200,
        r#"[{"id":1,"title":null},{"id":2,"title":"Wild Bandito","type":"SLOT"}]"#,
    )])
    .await;
    let client = HttpKioskClient::new(&server.base_url).unwrap();

    let games = client.fetch_catalog("tok").await.unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].title, "Wild Bandito");
}

#[tokio::test]
async fn test_heartbeat_sends_null_game_and_reads_command() {
    let server = MockServer::start(vec![(
        200,
        r#"{"credits":"3.00","command":"LOCK_SCREEN"}"#,
    )])
    .await;
    let client = HttpKioskClient::new(&server.base_url).unwrap();

    let resp = client.send_heartbeat("tok", None).await.unwrap();
    assert_eq!(resp.credits(), Some(Credits::from_cents(300)));
    assert_eq!(resp.command(), Some(RemoteCommand::LockScreen));

    let requests = server.requests();
    assert_eq!(requests[0].json(), json!({"current_game_id": null}));
}

#[tokio::test]
async fn test_start_game_sends_slug() {
    let server = MockServer::start(vec![(200, r#"{"url":"https://games.example/s/1"}"#)]).await;
    let client = HttpKioskClient::new(&server.base_url).unwrap();

    let resp = client
        .start_game("tok", &GameId::Text("fortune-tiger".into()))
        .await
        .unwrap();
    assert_eq!(resp.url, "https://games.example/s/1");
    assert_eq!(
        server.requests()[0].json(),
        json!({"game_slug": "fortune-tiger"})
    );
}

#[tokio::test]
async fn test_forbidden_keeps_status_and_body() {
    let server = MockServer::start(vec![(403, r#"{"error":"blocked"}"#)]).await;
    let client = HttpKioskClient::new(&server.base_url).unwrap();

    let err = client.authenticate("id", "1.0.0").await.unwrap_err();
    assert!(err.is_forbidden());
    assert_eq!(err.launch_detail(), "blocked");
}

#[tokio::test]
async fn test_non_json_error_body() {
    let server = MockServer::start(vec![(500, "<html>Internal Server Error</html>")]).await;
    let client = HttpKioskClient::new(&server.base_url).unwrap();

    let err = client
        .start_game("tok", &GameId::Number(1))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::status(500, None));
    assert_eq!(err.launch_detail(), "HTTP error 500: check the server logs.");
}

#[tokio::test]
async fn test_missing_url_field_is_local_error() {
    let server = MockServer::start(vec![(200, r#"{"status":"ok"}"#)]).await;
    let client = HttpKioskClient::new(&server.base_url).unwrap();

    let err = client
        .start_game("tok", &GameId::Number(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Local(_)));
}

#[tokio::test]
async fn test_connection_refused_is_no_response() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpKioskClient::new(&format!("http://{addr}/api")).unwrap();
    let err = client.fetch_catalog("tok").await.unwrap_err();
    assert!(matches!(err, ApiError::NoResponse(_)), "got {err:?}");
    assert_eq!(
        err.launch_detail(),
        "No response from server. Is the backend running?"
    );
}
