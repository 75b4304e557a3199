//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod check_username;
pub mod error;
pub mod join_room;
pub mod leave_room;
pub mod send_message;

pub use check_username::CheckUsernameUseCase;
pub use error::{JoinError, SendMessageError};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use send_message::{RouterSettings, SendMessageUseCase};
