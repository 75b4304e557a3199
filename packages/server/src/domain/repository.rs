//! Repository trait for the session registry.
//!
//! The use case layer depends on this trait, and infrastructure provides the
//! implementation (dependency inversion).

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{
    entity::Session,
    error::RepositoryError,
    event::RoomEvent,
    value_object::{ConnectionId, DisplayName},
};

/// Channel the registry delivers a connection's events into
pub type Outbox = UnboundedSender<RoomEvent>;

/// Result of removing a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Name the departed session held
    pub name: DisplayName,
    /// Members left in the room
    pub remaining: Vec<DisplayName>,
}

/// Session registry: identities, outboxes and event delivery.
///
/// Implementations guard all state with a single mutual-exclusion domain.
/// Compound operations (`join`, `leave`) mutate membership and deliver the
/// resulting events inside the same critical section, and `broadcast` delivers
/// to every member inside one critical section, so members observe events in
/// emission order.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Register the outbox of a newly accepted connection
    async fn attach(&self, connection_id: ConnectionId, outbox: Outbox);

    /// Drop the outbox of a closed connection
    async fn detach(&self, connection_id: &ConnectionId);

    /// Insert a session, then send `JoinSuccess` to the joiner and
    /// `UserJoined` to every other member with the post-insert member list.
    ///
    /// # Errors
    ///
    /// `RepositoryError::Room` when the name is taken or the connection has
    /// already joined, `RepositoryError::ConnectionNotAttached` when the
    /// connection has no outbox. Nothing is mutated or sent on error.
    async fn join(&self, session: Session) -> Result<Vec<DisplayName>, RepositoryError>;

    /// Remove the session owned by a connection and send `UserLeft` to the
    /// remaining members. Returns `None` when the connection has no session.
    async fn leave(&self, connection_id: &ConnectionId) -> Option<Departure>;

    /// Whether no session currently uses the name
    async fn is_name_available(&self, name: &DisplayName) -> bool;

    /// Display name owned by a connection
    async fn display_name_of(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// Snapshot of all sessions in join order
    async fn sessions(&self) -> Vec<Session>;

    /// Snapshot of all member names in join order
    async fn member_names(&self) -> Vec<DisplayName>;

    /// Deliver an event to every member. Returns the number of deliveries.
    async fn broadcast(&self, event: RoomEvent) -> usize;

    /// Deliver an event to one connection, joined or not. Returns whether the
    /// outbox accepted it.
    async fn unicast(&self, connection_id: &ConnectionId, event: RoomEvent) -> bool;
}
