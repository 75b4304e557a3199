//! UseCase: 参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 名前の検証、重複チェック、参加通知
//!
//! ### なぜこのテストが必要か
//! - 同じ名前のセッションが同時に存在しないことを保証する
//! - 失敗時は本人にだけ join_error が届き、状態が変わらないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加、退出後の同名での再参加
//! - 異常系：重複した名前、不正な名前、同じ接続での二重参加
//! - エッジケース：同じ名前での同時参加

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, RoomEvent, Session, SessionRepository, Timestamp,
};

use super::error::JoinError;

/// 参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 参加を実行
    ///
    /// 成功時は Repository が join_success / user_joined を配信する。
    /// 失敗時は要求元の接続にだけ join_error を送る。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<DisplayName>)` - 参加後のメンバー一覧
    /// * `Err(JoinError)` - 参加失敗（状態は変更されない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        requested_name: String,
    ) -> Result<Vec<DisplayName>, JoinError> {
        let result = self.try_join(connection_id, requested_name).await;

        if let Err(e) = &result {
            tracing::info!("Join rejected for connection '{}': {}", connection_id, e);
            self.repository
                .unicast(
                    connection_id,
                    RoomEvent::JoinError {
                        message: e.to_string(),
                    },
                )
                .await;
        }

        result
    }

    async fn try_join(
        &self,
        connection_id: &ConnectionId,
        requested_name: String,
    ) -> Result<Vec<DisplayName>, JoinError> {
        let name = DisplayName::try_from(requested_name)?;
        let session = Session::new(name.clone(), connection_id.clone(), Timestamp::now());

        let members = self.repository.join(session).await?;
        tracing::info!("'{}' joined the room ({} members)", name, members.len());

        Ok(members)
    }
}
