//! UseCase: バッファ・言語の同期処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SyncStateUseCase::update_code() / update_language()
//! - 後勝ち（last-write-wins）での上書きと、送信者以外への配信
//!
//! ### なぜこのテストが必要か
//! - Room 削除と競合して届いた遅延フレームがエラーにならないことを保証する
//! - 言語タグはリレー側で解釈・検証せず、そのまま上書きすることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存 Room への更新
//! - エッジケース：存在しない Room への更新（何もしない）
//! - エッジケース：長い・空の言語タグ（そのまま保存する）

use std::sync::Arc;

use crate::domain::{ConnectionId, LanguageTag, RepositoryError, RoomId, RoomRepository};

use super::Outcome;

/// バッファ・言語同期のユースケース
pub struct SyncStateUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl SyncStateUseCase {
    /// 新しい SyncStateUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// バッファを無条件に上書きし、送信者以外へ配信する
    ///
    /// # Returns
    ///
    /// * `Outcome::Applied` - 上書きして配信した
    /// * `Outcome::Ignored` - Room が存在しない（エラーにしない）
    pub async fn update_code(
        &self,
        room_id: &RoomId,
        from: &ConnectionId,
        code: String,
    ) -> Outcome {
        let result = self.repository.replace_code(room_id, from, code).await;
        Self::settle(room_id, "code", result)
    }

    /// 言語タグを無条件に上書きし、送信者以外へ配信する
    pub async fn update_language(
        &self,
        room_id: &RoomId,
        from: &ConnectionId,
        language: String,
    ) -> Outcome {
        let result = self
            .repository
            .replace_language(room_id, from, LanguageTag::new(language))
            .await;
        Self::settle(room_id, "language", result)
    }

    fn settle(room_id: &RoomId, field: &str, result: Result<u64, RepositoryError>) -> Outcome {
        match result {
            Ok(revision) => {
                tracing::debug!(
                    "Room '{}' {} updated (revision {})",
                    room_id,
                    field,
                    revision
                );
                Outcome::Applied
            }
            Err(e) => {
                tracing::debug!("Dropped {} update for room '{}': {}", field, room_id, e);
                Outcome::Ignored
            }
        }
    }
}
