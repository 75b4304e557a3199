//! WebSocket message DTOs for the chat application.
//!
//! Every frame is a JSON object `{"event": <name>, "data": {...}}` with
//! snake_case event names.

use chaguan_shared::time::format_clock;
use serde::{Deserialize, Serialize};

use crate::domain::{RoomEvent, WeatherReport};

/// Inbound frame from a client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    Join(JoinPayload),
    SendMessage(SendMessagePayload),
    Leave,
    Disconnect,
}

/// Payload of `join`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JoinPayload {
    pub username: String,
}

/// Payload of `send_message`
///
/// `username` is accepted for compatibility; the server uses the name the
/// connection joined with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SendMessagePayload {
    pub username: String,
    pub message: String,
}

/// Outbound frame to a client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    JoinSuccess {
        username: String,
        users: Vec<String>,
    },
    JoinError {
        message: String,
    },
    UserJoined {
        username: String,
        users: Vec<String>,
    },
    UserLeft {
        username: String,
        users: Vec<String>,
    },
    NewMessage {
        username: String,
        message: String,
        time: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        weather: Option<WeatherReport>,
    },
    MovieRequest {
        username: String,
        original_url: String,
        parsed_url: String,
        has_proxy: bool,
        proxy_type: String,
    },
    AiRequest {
        username: String,
        query: String,
    },
    AiResponse {
        username: String,
        message: String,
        time: String,
    },
}

impl From<RoomEvent> for ServerMessage {
    fn from(event: RoomEvent) -> Self {
        match event {
            RoomEvent::JoinSuccess { username, users } => Self::JoinSuccess { username, users },
            RoomEvent::JoinError { message } => Self::JoinError { message },
            RoomEvent::UserJoined { username, users } => Self::UserJoined { username, users },
            RoomEvent::UserLeft { username, users } => Self::UserLeft { username, users },
            RoomEvent::NewMessage {
                username,
                message,
                time,
                weather,
            } => Self::NewMessage {
                username,
                message,
                time: format_clock(time.value()),
                weather,
            },
            RoomEvent::MovieRequest {
                username,
                original_url,
                parsed_url,
                has_proxy,
                proxy_type,
            } => Self::MovieRequest {
                username,
                original_url,
                parsed_url,
                has_proxy,
                proxy_type,
            },
            RoomEvent::AiRequest { username, query } => Self::AiRequest { username, query },
            RoomEvent::AiResponse {
                username,
                message,
                time,
            } => Self::AiResponse {
                username,
                message,
                time: format_clock(time.value()),
            },
        }
    }
}
