//! UseCase 層のエラー定義

use thiserror::Error;

/// 参加処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// 同じ接続がすでに参加している
    #[error("Connection '{0}' already joined the room")]
    AlreadyJoined(String),

    /// その他の理由で Room が参加を拒否した
    #[error("Join rejected: {0}")]
    Rejected(String),
}

/// 退出処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LeaveError {
    /// Room がすでに存在しない
    #[error("Room '{0}' not found")]
    UnknownRoom(String),

    /// 接続が Room の参加者ではない
    #[error("Connection '{0}' is not a member of the room")]
    NotAMember(String),
}
