//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, RoomError, ValueObjectError};

/// 参加処理のエラー
///
/// `Display` の文言はそのまま join_error としてクライアントに送られる。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// 同じ名前のセッションが既に存在する
    #[error("username already exists")]
    NameTaken(String),

    /// この接続は既に別の名前で参加している
    #[error("already joined as {0}")]
    AlreadyJoined(String),

    /// 名前が不正（空・長すぎる）
    #[error(transparent)]
    InvalidName(#[from] ValueObjectError),

    /// 接続が登録されていない
    #[error("connection is not available")]
    ConnectionNotAttached,
}

impl From<RepositoryError> for JoinError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Room(RoomError::NameTaken(name)) => Self::NameTaken(name),
            RepositoryError::Room(RoomError::AlreadyJoined(name)) => Self::AlreadyJoined(name),
            RepositoryError::ConnectionNotAttached(_) => Self::ConnectionNotAttached,
        }
    }
}

/// メッセージ送信処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// 送信元の接続がまだ参加していない
    #[error("connection has not joined the room")]
    NotJoined,

    /// メッセージ本文が不正（空・長すぎる）
    #[error(transparent)]
    InvalidContent(#[from] ValueObjectError),
}
