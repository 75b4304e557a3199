//! Shared helpers for end-to-end tests.
#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    Router,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chaguan_server::{
    config::AppConfig,
    domain::{WeatherError, WeatherProvider, WeatherReport},
    ui::{build_router, state::AppState},
};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

/// Weather stub: knows Beijing, reports everything else as unknown
pub struct StubWeather;

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn lookup(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        match city {
            "北京" => Ok(WeatherReport {
                city: "北京".to_string(),
                temperature: "20".to_string(),
                weather: "晴".to_string(),
                humidity: "40".to_string(),
                winddirection: "东".to_string(),
                windpower: "3".to_string(),
                reporttime: "2024-01-01 12:00:00".to_string(),
            }),
            other => Err(WeatherError::CityNotFound(other.to_string())),
        }
    }
}

/// Body served by [`spawn_media_upstream`]
pub const MEDIA_BODY: &str = "0123456789";

/// Start an upstream serving [`MEDIA_BODY`] at `/video.mp4`, honouring
/// `Range: bytes=<start>-<end>`
pub async fn spawn_media_upstream() -> std::net::SocketAddr {
    async fn video(headers: HeaderMap) -> Response {
        let range = headers
            .get(header::RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("bytes="))
            .and_then(|v| v.split_once('-'))
            .and_then(|(start, end)| Some((start.parse::<usize>().ok()?, end.parse::<usize>().ok()?)));

        match range {
            Some((start, end)) if start <= end && end < MEDIA_BODY.len() => (
                StatusCode::PARTIAL_CONTENT,
                [
                    (header::CONTENT_TYPE, "video/mp4".to_string()),
                    (header::ACCEPT_RANGES, "bytes".to_string()),
                    (
                        header::CONTENT_RANGE,
                        format!("bytes {start}-{end}/{}", MEDIA_BODY.len()),
                    ),
                ],
                MEDIA_BODY[start..=end].to_string(),
            )
                .into_response(),
            _ => (
                [
                    (header::CONTENT_TYPE, "video/mp4".to_string()),
                    (header::ACCEPT_RANGES, "bytes".to_string()),
                ],
                MEDIA_BODY.to_string(),
            )
                .into_response(),
        }
    }

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream");
    let addr = listener.local_addr().expect("Failed to read address");
    let app = Router::new().route("/video.mp4", get(video));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// In-process server bound to an ephemeral port
pub struct TestServer {
    addr: std::net::SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let mut config = AppConfig::default();
        config.chatbot.thinking_delay_ms = 0;
        Self::start_with(config).await
    }

    pub async fn start_with(config: AppConfig) -> Self {
        let state = Arc::new(
            AppState::new(&config, Arc::new(StubWeather)).expect("Failed to build state"),
        );
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to read address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, build_router(state))
                .await
                .expect("Server failed");
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn connect(&self) -> TestClient {
        let (stream, _) = tokio_tungstenite::connect_async(self.ws_url())
            .await
            .expect("Failed to connect");
        TestClient { stream }
    }

    /// Connect and join under `name`, consuming the `join_success` frame
    pub async fn join(&self, name: &str) -> TestClient {
        let mut client = self.connect().await;
        client
            .send(serde_json::json!({"event": "join", "data": {"username": name}}))
            .await;
        let frame = client.expect_event("join_success").await;
        assert_eq!(frame["data"]["username"], name);
        client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn send(&mut self, frame: serde_json::Value) {
        self.stream
            .send(Message::Text(frame.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn say(&mut self, name: &str, message: &str) {
        self.send(serde_json::json!({
            "event": "send_message",
            "data": {"username": name, "message": message}
        }))
        .await;
    }

    /// Next JSON frame, failing after two seconds
    pub async fn recv(&mut self) -> serde_json::Value {
        loop {
            let msg = tokio::time::timeout(Duration::from_secs(2), self.stream.next())
                .await
                .expect("Timed out waiting for frame")
                .expect("Stream closed")
                .expect("WebSocket error");
            if let Message::Text(text) = msg {
                return serde_json::from_str(text.as_str()).expect("Invalid JSON frame");
            }
        }
    }

    /// Skip frames until one named `event` arrives
    pub async fn expect_event(&mut self, event: &str) -> serde_json::Value {
        loop {
            let frame = self.recv().await;
            if frame["event"] == event {
                return frame;
            }
        }
    }

    /// Assert no frame arrives within a short window
    pub async fn expect_silence(&mut self) {
        let result = tokio::time::timeout(Duration::from_millis(200), self.stream.next()).await;
        assert!(result.is_err(), "Unexpected frame: {:?}", result);
    }

    /// Drop the TCP connection without a close handshake
    pub fn drop_connection(self) {
        drop(self.stream);
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
