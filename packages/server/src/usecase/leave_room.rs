//! UseCase: 退出・切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 明示的な退出と切断の両方で同じ処理が使われる
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の退出と残りのメンバーへの通知
//! - エッジケース：参加していない接続の切断（何もしない）

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, SessionRepository};

/// 退出のユースケース
pub struct LeaveRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 退出を実行
    ///
    /// # Returns
    ///
    /// * `Some(DisplayName)` - 退出したセッションの名前
    /// * `None` - この接続はセッションを持っていなかった
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        match self.repository.leave(connection_id).await {
            Some(departure) => {
                tracing::info!(
                    "'{}' left the room ({} members remaining)",
                    departure.name,
                    departure.remaining.len()
                );
                Some(departure.name)
            }
            None => {
                tracing::debug!("Unknown connection '{}' left", connection_id);
                None
            }
        }
    }
}
