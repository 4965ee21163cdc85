//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! [`RoomRegistry`] を 1 つの Mutex で保護し、各操作（参加・退出・更新・チャット）を
//! ロックを保持したまま「状態変更 + 配信キューへの投入」まで一括で行います。
//!
//! 配信キューは非同期に待たない unbounded channel なので、クリティカルセクション内で
//! I/O 待ちは発生しません。これによりリレーへの到着順と配信順が一致します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::registry::RoomRegistry;
use crate::domain::{
    ChatMessage, ClientSender, ConnectionId, LanguageTag, LeaveOutcome, Member, RepositoryError,
    Room, RoomId, RoomRepository,
};

/// インメモリ Room Repository 実装
///
/// ドメイン層の RoomRepository trait を実装します（依存性の逆転）。
pub struct InMemoryRoomRepository {
    /// Room レジストリ（Room ID → Room + 接続ごとの送信チャンネル）
    registry: Mutex<RoomRegistry>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::with_registry(RoomRegistry::new())
    }

    /// 既存のレジストリから作成（テストで容量を変えたい場合など）
    pub fn with_registry(registry: RoomRegistry) -> Self {
        Self {
            registry: Mutex::new(registry),
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn join(
        &self,
        room_id: RoomId,
        member: Member,
        sender: ClientSender,
    ) -> Result<usize, RepositoryError> {
        let mut registry = self.registry.lock().await;
        let slot = registry.get_or_create(&room_id);

        let connection_id = member.connection_id.clone();
        let envelopes = slot.room.join(member)?;

        // 新しい参加者にも welcome / スナップショットを届けるため、配信前に登録する
        slot.attach(connection_id, sender);
        slot.deliver(envelopes);

        Ok(slot.room.member_count())
    }

    async fn leave(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<LeaveOutcome, RepositoryError> {
        let mut registry = self.registry.lock().await;
        let slot = registry.get_mut(room_id)?;

        let envelopes = slot.room.leave(connection_id)?;
        slot.detach(connection_id);
        slot.deliver(envelopes);

        let remaining = slot.room.member_count();
        let room_removed = remaining == 0;
        if room_removed {
            registry.remove(room_id);
        }

        Ok(LeaveOutcome {
            remaining,
            room_removed,
        })
    }

    async fn replace_code(
        &self,
        room_id: &RoomId,
        from: &ConnectionId,
        code: String,
    ) -> Result<u64, RepositoryError> {
        let mut registry = self.registry.lock().await;
        let slot = registry.get_mut(room_id)?;

        let envelopes = slot.room.replace_code(from, code);
        slot.deliver(envelopes);

        Ok(slot.room.revision)
    }

    async fn replace_language(
        &self,
        room_id: &RoomId,
        from: &ConnectionId,
        language: LanguageTag,
    ) -> Result<u64, RepositoryError> {
        let mut registry = self.registry.lock().await;
        let slot = registry.get_mut(room_id)?;

        let envelopes = slot.room.replace_language(from, language);
        slot.deliver(envelopes);

        Ok(slot.room.revision)
    }

    async fn post_message(
        &self,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Result<(), RepositoryError> {
        let mut registry = self.registry.lock().await;
        let slot = registry.get_mut(room_id)?;

        let envelopes = slot.room.post_message(message);
        slot.deliver(envelopes);

        Ok(())
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let registry = self.registry.lock().await;
        registry.get(room_id).map(|slot| slot.room.clone())
    }

    async fn count_rooms(&self) -> usize {
        let registry = self.registry.lock().await;
        registry.len()
    }
}
