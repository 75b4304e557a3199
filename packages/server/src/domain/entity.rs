//! Core domain models for the chat application.

use serde::{Deserialize, Serialize};

use super::{
    error::RoomError,
    value_object::{ConnectionId, DisplayName, Timestamp},
};

/// The single chat room and its current members
///
/// Sessions are kept in join order. A display name and a connection each
/// appear at most once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Room {
    /// Sessions currently in the room, in join order
    pub sessions: Vec<Session>,
}

impl Room {
    /// Create an empty room
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session to the room
    ///
    /// # Errors
    ///
    /// Returns `RoomError::NameTaken` if another session already uses the name,
    /// or `RoomError::AlreadyJoined` if the connection already owns a session.
    /// The room is left untouched in both cases.
    pub fn add_session(&mut self, session: Session) -> Result<(), RoomError> {
        if self.contains_name(&session.name) {
            return Err(RoomError::NameTaken(session.name.into_string()));
        }
        if let Some(existing) = self.session_of(&session.connection_id) {
            return Err(RoomError::AlreadyJoined(existing.name.as_str().to_string()));
        }
        self.sessions.push(session);
        Ok(())
    }

    /// Remove the session owned by a connection, if any
    pub fn remove_by_connection(&mut self, connection_id: &ConnectionId) -> Option<Session> {
        let index = self
            .sessions
            .iter()
            .position(|s| &s.connection_id == connection_id)?;
        Some(self.sessions.remove(index))
    }

    /// Whether a session with exactly this name exists
    pub fn contains_name(&self, name: &DisplayName) -> bool {
        self.sessions.iter().any(|s| &s.name == name)
    }

    /// Get the session owned by a connection
    pub fn session_of(&self, connection_id: &ConnectionId) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|s| &s.connection_id == connection_id)
    }

    /// Names of all members, in join order
    pub fn member_names(&self) -> Vec<DisplayName> {
        self.sessions.iter().map(|s| s.name.clone()).collect()
    }
}

/// Represents one participant connected to the room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Display name claimed on join
    pub name: DisplayName,
    /// Transport connection that owns the session
    pub connection_id: ConnectionId,
    /// Timestamp when the session joined
    pub joined_at: Timestamp,
}

impl Session {
    /// Create a new session
    pub fn new(name: DisplayName, connection_id: ConnectionId, joined_at: Timestamp) -> Self {
        Self {
            name,
            connection_id,
            joined_at,
        }
    }
}
