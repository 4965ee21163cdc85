//! UseCase: Room への参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 初回参加での Room 作成、参加者リストの配信、スナップショットと履歴の送信
//!
//! ### なぜこのテストが必要か
//! - 新しい参加者が、後続のどの更新よりも先に現在の状態を受け取ることを保証する
//! - 同じ接続での二重参加を防ぐ
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しい Room への参加、既存 Room への参加
//! - 異常系：同じ接続 ID での二重参加

use std::sync::Arc;

use crate::domain::{ClientSender, Member, RepositoryError, RoomError, RoomId, RoomRepository};

use super::error::JoinError;

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 参加を実行
    ///
    /// Room が無ければ作成し、参加者リストを全員へ、現在のバッファ・言語と
    /// チャット履歴を新しい参加者だけへ配信キューに積みます。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 参加先の Room ID
    /// * `member` - 参加する接続と表示名
    /// * `sender` - この接続の送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 参加後の参加者数
    /// * `Err(JoinError)` - 参加失敗
    pub async fn execute(
        &self,
        room_id: RoomId,
        member: Member,
        sender: ClientSender,
    ) -> Result<usize, JoinError> {
        self.repository
            .join(room_id, member, sender)
            .await
            .map_err(|e| match e {
                RepositoryError::Room(RoomError::DuplicateConnection(id)) => {
                    JoinError::AlreadyJoined(id)
                }
                other => JoinError::Rejected(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, DisplayName},
        infrastructure::repository::InMemoryRoomRepository,
    };
    use tokio::sync::mpsc;

    fn member(id: &str, name: &str) -> Member {
        Member::new(
            ConnectionId::new(id.to_string()).unwrap(),
            DisplayName::new(name.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_join_creates_room() {
        // テスト項目: 初回参加で Room が作成される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = JoinRoomUseCase::new(repository.clone());
        let (tx, _rx) = mpsc::unbounded_channel();
        let room_id = RoomId::new("r1".to_string()).unwrap();

        // when (操作):
        let result = usecase.execute(room_id.clone(), member("a", "alice"), tx).await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
        let room = repository.get_room(&room_id).await.unwrap();
        assert_eq!(room.members[0].display_name.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_join_replays_transcript_to_new_member_only() {
        // テスト項目: 新しい参加者だけに履歴が古い順で届く
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = JoinRoomUseCase::new(repository.clone());
        let room_id = RoomId::new("r1".to_string()).unwrap();
        let alice = member("a", "alice");
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        usecase
            .execute(room_id.clone(), alice.clone(), tx_a)
            .await
            .unwrap();
        for (i, text) in ["one", "two"].iter().enumerate() {
            let message = crate::domain::ChatMessage::new(
                crate::domain::MessageId::new(format!("m{i}")).unwrap(),
                &alice,
                crate::domain::MessageContent::new(text.to_string()),
                crate::domain::Timestamp::new(i as i64),
            );
            repository.post_message(&room_id, message).await.unwrap();
        }
        while rx_a.try_recv().is_ok() {}

        // when (操作):
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        usecase
            .execute(room_id.clone(), member("b", "bob"), tx_b)
            .await
            .unwrap();

        // then (期待する結果):
        let mut chat = Vec::new();
        while let Ok(frame) = rx_b.try_recv() {
            let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
            if value["type"] == "chat-message" {
                chat.push(value["message"]["text"].as_str().unwrap().to_string());
            }
        }
        assert_eq!(chat, vec!["one", "two"]);

        // alice には履歴は再送されない（リストのみ）
        let frame = rx_a.try_recv().unwrap();
        assert!(frame.contains("user-list-update"));
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_join_duplicate_connection_error() {
        // テスト項目: 同じ接続 ID で二重参加するとエラーになる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = JoinRoomUseCase::new(repository.clone());
        let room_id = RoomId::new("r1".to_string()).unwrap();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        usecase
            .execute(room_id.clone(), member("a", "alice"), tx1)
            .await
            .unwrap();

        // when (操作):
        let result = usecase.execute(room_id.clone(), member("a", "alice"), tx2).await;

        // then (期待する結果):
        assert_eq!(result, Err(JoinError::AlreadyJoined("a".to_string())));
        assert_eq!(repository.get_room(&room_id).await.unwrap().member_count(), 1);
    }
}
