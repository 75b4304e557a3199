//! UseCase: 名前の空き確認
//!
//! 参加前の事前確認に使う。名前を予約しないため、確認と参加の間に
//! 他の接続が同じ名前で参加することはあり得る（参加処理が最終判断）。

use std::sync::Arc;

use crate::domain::{DisplayName, SessionRepository};

/// 名前の空き確認のユースケース
pub struct CheckUsernameUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl CheckUsernameUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 名前が使えるかどうか。不正な名前は使えないものとして扱う。
    pub async fn execute(&self, requested_name: String) -> bool {
        match DisplayName::try_from(requested_name) {
            Ok(name) => self.repository.is_name_available(&name).await,
            Err(_) => false,
        }
    }
}
