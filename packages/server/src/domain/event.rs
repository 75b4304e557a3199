//! Events the room emits to connections.

use super::{value_object::Timestamp, weather::WeatherReport};

/// An outbound event, delivered by unicast or broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// Join acknowledged; `users` is the member list including the joiner
    JoinSuccess { username: String, users: Vec<String> },
    /// Join rejected
    JoinError { message: String },
    /// Another member joined
    UserJoined { username: String, users: Vec<String> },
    /// A member left or disconnected
    UserLeft { username: String, users: Vec<String> },
    /// Chat text from a member or from the system
    NewMessage {
        username: String,
        message: String,
        time: Timestamp,
        weather: Option<WeatherReport>,
    },
    /// A shared video link
    MovieRequest {
        username: String,
        original_url: String,
        parsed_url: String,
        has_proxy: bool,
        proxy_type: String,
    },
    /// Echo of a question addressed to the chatbot
    AiRequest { username: String, query: String },
    /// The chatbot's reply
    AiResponse {
        username: String,
        message: String,
        time: Timestamp,
    },
}

impl RoomEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::JoinSuccess { .. } => "join_success",
            RoomEvent::JoinError { .. } => "join_error",
            RoomEvent::UserJoined { .. } => "user_joined",
            RoomEvent::UserLeft { .. } => "user_left",
            RoomEvent::NewMessage { .. } => "new_message",
            RoomEvent::MovieRequest { .. } => "movie_request",
            RoomEvent::AiRequest { .. } => "ai_request",
            RoomEvent::AiResponse { .. } => "ai_response",
        }
    }

    /// A plain-text message authored by `username`, stamped now
    pub fn text(username: impl Into<String>, message: impl Into<String>) -> Self {
        RoomEvent::NewMessage {
            username: username.into(),
            message: message.into(),
            time: Timestamp::now(),
            weather: None,
        }
    }
}
