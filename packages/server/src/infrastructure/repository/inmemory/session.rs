//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! Room（参加者の名前表）と接続ごとの送信チャンネル（outbox）を
//! 一つの Mutex でまとめて保護します。
//!
//! 参加・退出・ブロードキャストはすべてロックを保持したまま配信まで行うため、
//! どの参加者から見てもメンバー一覧とイベントの順序が一致します。
//! 配信は unbounded channel への送信なのでロック中にブロックしません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Departure, DisplayName, Outbox, RepositoryError, Room, RoomEvent, Session,
    SessionRepository,
};

/// ロックで保護される状態
#[derive(Default)]
struct RegistryState {
    /// Room ドメインモデル（名前 ↔ 接続の対応）
    room: Room,
    /// 接続中の全クライアントの outbox（未参加の接続を含む）
    outboxes: HashMap<ConnectionId, Outbox>,
}

impl RegistryState {
    /// 1 つの接続にイベントを配信する
    fn deliver(&self, connection_id: &ConnectionId, event: RoomEvent) -> bool {
        let Some(outbox) = self.outboxes.get(connection_id) else {
            tracing::debug!(
                "No outbox for connection '{}', dropping '{}'",
                connection_id,
                event.name()
            );
            return false;
        };
        if outbox.send(event).is_err() {
            tracing::warn!("Outbox of connection '{}' is closed", connection_id);
            return false;
        }
        true
    }

    /// 参加中の全メンバーに配信する（`exclude` を除く）
    fn deliver_to_members(&self, event: &RoomEvent, exclude: Option<&ConnectionId>) -> usize {
        self.room
            .sessions
            .iter()
            .filter(|s| Some(&s.connection_id) != exclude)
            .filter(|s| self.deliver(&s.connection_id, event.clone()))
            .count()
    }

    fn member_list(&self) -> Vec<String> {
        self.room
            .sessions
            .iter()
            .map(|s| s.name.as_str().to_string())
            .collect()
    }
}

/// インメモリ Session Repository 実装
///
/// ドメイン層の SessionRepository trait を実装します（依存性の逆転）。
#[derive(Default)]
pub struct InMemorySessionRepository {
    state: Mutex<RegistryState>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// outbox が登録されている接続の数
    pub async fn count_attached(&self) -> usize {
        self.state.lock().await.outboxes.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn attach(&self, connection_id: ConnectionId, outbox: Outbox) {
        let mut state = self.state.lock().await;
        state.outboxes.insert(connection_id, outbox);
    }

    async fn detach(&self, connection_id: &ConnectionId) {
        let mut state = self.state.lock().await;
        state.outboxes.remove(connection_id);
    }

    async fn join(&self, session: Session) -> Result<Vec<DisplayName>, RepositoryError> {
        let mut state = self.state.lock().await;

        if !state.outboxes.contains_key(&session.connection_id) {
            return Err(RepositoryError::ConnectionNotAttached(
                session.connection_id.to_string(),
            ));
        }

        let username = session.name.as_str().to_string();
        let connection_id = session.connection_id.clone();
        state.room.add_session(session)?;

        // 参加者本人への応答と他メンバーへの通知は同じスナップショットを使う
        let users = state.member_list();
        state.deliver(
            &connection_id,
            RoomEvent::JoinSuccess {
                username: username.clone(),
                users: users.clone(),
            },
        );
        state.deliver_to_members(
            &RoomEvent::UserJoined { username, users },
            Some(&connection_id),
        );

        Ok(state.room.member_names())
    }

    async fn leave(&self, connection_id: &ConnectionId) -> Option<Departure> {
        let mut state = self.state.lock().await;

        let session = state.room.remove_by_connection(connection_id)?;
        let users = state.member_list();
        state.deliver_to_members(
            &RoomEvent::UserLeft {
                username: session.name.as_str().to_string(),
                users,
            },
            None,
        );

        Some(Departure {
            name: session.name,
            remaining: state.room.member_names(),
        })
    }

    async fn is_name_available(&self, name: &DisplayName) -> bool {
        let state = self.state.lock().await;
        !state.room.contains_name(name)
    }

    async fn display_name_of(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let state = self.state.lock().await;
        state.room.session_of(connection_id).map(|s| s.name.clone())
    }

    async fn sessions(&self) -> Vec<Session> {
        let state = self.state.lock().await;
        state.room.sessions.clone()
    }

    async fn member_names(&self) -> Vec<DisplayName> {
        let state = self.state.lock().await;
        state.room.member_names()
    }

    async fn broadcast(&self, event: RoomEvent) -> usize {
        let state = self.state.lock().await;
        state.deliver_to_members(&event, None)
    }

    async fn unicast(&self, connection_id: &ConnectionId, event: RoomEvent) -> bool {
        let state = self.state.lock().await;
        state.deliver(connection_id, event)
    }
}
