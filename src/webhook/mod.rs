/// Outbound automation webhook
///
/// Sends a single POST with a capture-event payload to a user-supplied
/// endpoint (typically an n8n webhook URL). Delivery is deliberately
/// best-effort and at-most-once: the response is dropped unread, nothing
/// is retried, and transport failures are logged but never surfaced as
/// user-facing errors.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Event tag sent for every trigger
pub const EVENT_PHOTO_CAPTURED: &str = "photo_captured";
/// Application name advertised in the payload
pub const APP_NAME: &str = "AR Camera App";
/// Origin identifier for this native build, standing in for a web origin
pub const TRIGGERED_FROM: &str = "app://ar-camera-studio";

/// The JSON body POSTed to the endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureEvent {
    /// ISO-8601 / RFC 3339 timestamp of the trigger
    pub timestamp: String,
    pub user_email: String,
    pub event_type: String,
    pub app_name: String,
    pub triggered_from: String,
}

impl CaptureEvent {
    /// Build a photo-captured event for the given user, stamped now
    pub fn photo_captured(user_email: &str) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            user_email: user_email.to_string(),
            event_type: EVENT_PHOTO_CAPTURED.to_string(),
            app_name: APP_NAME.to_string(),
            triggered_from: TRIGGERED_FROM.to_string(),
        }
    }
}

/// Shared HTTP client so repeated triggers reuse pooled connections
fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

/// Errors reported before any network activity happens
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebhookError {
    #[error("please enter a webhook URL")]
    EmptyUrl,
}

/// Fire the webhook.
///
/// Precondition: a non-empty URL; an empty one fails without touching the
/// network. Past that point the call always reports success; the remote
/// outcome is intentionally unobservable, like an opaque no-cors fetch.
/// Failures are logged at WARN so they are at least diagnosable.
pub async fn trigger(url: String, event: CaptureEvent) -> Result<(), WebhookError> {
    if url.trim().is_empty() {
        return Err(WebhookError::EmptyUrl);
    }

    tracing::info!(%url, event_type = %event.event_type, "triggering webhook");

    match http_client().post(&url).json(&event).send().await {
        // Response body and status are dropped unread
        Ok(_) => tracing::debug!(%url, "webhook request completed"),
        Err(err) => {
            tracing::warn!(%url, error = %err, "webhook delivery failed (best-effort, not retried)");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_url_fails_without_network() {
        let event = CaptureEvent::photo_captured("demo@example.com");
        let result = trigger(String::new(), event.clone()).await;
        assert_eq!(result, Err(WebhookError::EmptyUrl));

        // Whitespace-only counts as empty too
        let result = trigger("   ".to_string(), event).await;
        assert_eq!(result, Err(WebhookError::EmptyUrl));
    }

    #[test]
    fn test_payload_shape() {
        let event = CaptureEvent::photo_captured("demo@example.com");
        let value = serde_json::to_value(&event).unwrap();
        let body = value.as_object().unwrap();

        let mut keys: Vec<&str> = body.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "app_name",
                "event_type",
                "timestamp",
                "triggered_from",
                "user_email"
            ]
        );

        assert_eq!(body["event_type"], "photo_captured");
        assert_eq!(body["app_name"], "AR Camera App");
        assert_eq!(body["user_email"], "demo@example.com");

        // The timestamp must parse back as RFC 3339
        let ts = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    /// Accept one HTTP request, return its raw bytes, answer 200, then
    /// fail if anything else arrives on the connection
    async fn serve_one_request(listener: tokio::net::TcpListener) -> Vec<u8> {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "client hung up before finishing the request");
            raw.extend_from_slice(&buf[..n]);

            if let Some(header_end) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&raw[..header_end]).to_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if raw.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n")
            .await
            .unwrap();

        // Nothing further may arrive: one trigger means one POST
        let followup = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            socket.read(&mut buf),
        )
        .await;
        match followup {
            Ok(Ok(n)) => assert_eq!(n, 0, "unexpected second request"),
            Ok(Err(_)) | Err(_) => {}
        }

        raw
    }

    #[tokio::test]
    async fn test_non_empty_url_posts_documented_payload_once() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(serve_one_request(listener));

        let event = CaptureEvent::photo_captured("demo@example.com");
        let result = trigger(format!("http://{addr}/webhook/test"), event).await;
        assert_eq!(result, Ok(()));

        let raw = server.await.unwrap();
        let request = String::from_utf8_lossy(&raw);

        assert!(request.starts_with("POST /webhook/test HTTP/1.1"));
        assert!(request
            .to_lowercase()
            .contains("content-type: application/json"));

        let body_start = request.find("\r\n\r\n").unwrap() + 4;
        let body: serde_json::Value = serde_json::from_str(&request[body_start..]).unwrap();
        let body = body.as_object().unwrap();

        let mut keys: Vec<&str> = body.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "app_name",
                "event_type",
                "timestamp",
                "triggered_from",
                "user_email"
            ]
        );
        assert_eq!(body["event_type"], "photo_captured");
        assert_eq!(body["user_email"], "demo@example.com");
    }

    #[tokio::test]
    async fn test_transport_failure_is_swallowed() {
        // Grab a port that refuses connections by binding then dropping
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let event = CaptureEvent::photo_captured("demo@example.com");
        let result = trigger(format!("http://{addr}/webhook/test"), event).await;

        // Delivery failed, but the trigger still reports success
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_http_client_is_shared() {
        assert!(std::ptr::eq(http_client(), http_client()));
    }

    #[test]
    fn test_payload_round_trips() {
        let event = CaptureEvent::photo_captured("demo@example.com");
        let json = serde_json::to_string(&event).unwrap();
        let restored: CaptureEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, restored);
    }
}
