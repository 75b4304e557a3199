//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod chatbot;
pub mod command;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod mention;
pub mod repository;
pub mod value_object;
pub mod weather;

pub use chatbot::{ChatbotPolicy, ScriptedChatbot};
pub use command::{Command, CommandEntry, CommandKind, CommandTable};
pub use entity::{Room, Session};
pub use error::{RepositoryError, RoomError, ValueObjectError};
pub use event::RoomEvent;
pub use factory::ConnectionIdFactory;
pub use repository::{Departure, Outbox, SessionRepository};
pub use value_object::{ConnectionId, DisplayName, MessageContent, Timestamp};
pub use weather::{WeatherError, WeatherProvider, WeatherReport};
