//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod error;
pub mod join_room;
pub mod leave_room;
pub mod send_chat;
pub mod sync_state;

pub use error::{JoinError, LeaveError};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use send_chat::SendChatUseCase;
pub use sync_state::SyncStateUseCase;

/// Result of a client→relay mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed and the broadcast was queued
    Applied,
    /// The room no longer exists (e.g. a late frame after teardown); nothing happened
    Ignored,
}
