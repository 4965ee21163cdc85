//! UseCase: Room からの退出処理
//!
//! 明示的な退出とネットワーク切断は区別しません。どちらもこのユースケースで処理されます。

use std::sync::Arc;

use crate::domain::{ConnectionId, LeaveOutcome, RepositoryError, RoomId, RoomRepository};

use super::error::LeaveError;

/// Room 退出のユースケース
pub struct LeaveRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 退出を実行
    ///
    /// 残りの参加者に新しいリストを配信し、参加者が 0 人になった Room は即座に削除します。
    pub async fn execute(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<LeaveOutcome, LeaveError> {
        self.repository
            .leave(room_id, connection_id)
            .await
            .map_err(|e| match e {
                RepositoryError::RoomNotFound(id) => LeaveError::UnknownRoom(id),
                RepositoryError::Room(_) => {
                    LeaveError::NotAMember(connection_id.as_str().to_string())
                }
            })
    }
}
