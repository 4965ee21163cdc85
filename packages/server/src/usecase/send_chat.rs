//! UseCase: チャット送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatUseCase::execute() メソッド
//! - リレー側タイムスタンプ付きのメッセージ作成、履歴への追加、全員への配信
//!
//! ### なぜこのテストが必要か
//! - 送信者も含めて全員が同じ（リレーが決めた）タイムスタンプを受け取ることを保証する
//! - 送信者の ID・表示名はハンドシェイク時の値が使われることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信
//! - エッジケース：存在しない Room（何もしない）、ID 省略時の自動採番、空の本文

use std::sync::Arc;

use crate::domain::{
    ChatMessage, Member, MessageContent, MessageId, MessageIdFactory, RoomId, RoomRepository,
    Timestamp,
};

use super::Outcome;

/// チャット送信のユースケース
pub struct SendChatUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl SendChatUseCase {
    /// 新しい SendChatUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 送信先 Room
    /// * `author` - ハンドシェイク時に確定した送信者
    /// * `message_id` - クライアントが付けた ID（無ければリレーが採番）
    /// * `text` - 本文
    ///
    /// # Returns
    ///
    /// * `Outcome::Applied` - 履歴に追加し全員へ配信した
    /// * `Outcome::Ignored` - Room が存在しない
    pub async fn execute(
        &self,
        room_id: &RoomId,
        author: &Member,
        message_id: Option<String>,
        text: String,
    ) -> Outcome {
        // 空の ID は MessageId にならないので採番に回る
        let id = message_id
            .and_then(|id| MessageId::new(id).ok())
            .unwrap_or_else(MessageIdFactory::generate);

        let message = ChatMessage::new(id, author, MessageContent::new(text), Timestamp::now());
        match self.repository.post_message(room_id, message).await {
            Ok(()) => Outcome::Applied,
            Err(e) => {
                tracing::debug!("Dropped chat message for room '{}': {}", room_id, e);
                Outcome::Ignored
            }
        }
    }
}
