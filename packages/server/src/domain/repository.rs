//! Repository trait for room storage.
//!
//! The UseCase layer depends on this trait, not on a concrete store.
//! Every method is one atomic step: the room is mutated and all resulting
//! frames are queued to member connections before the next step can start.

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{
    ChatMessage, ConnectionId, LanguageTag, Member, RepositoryError, Room, RoomId,
};

/// Outbound queue of a single connection (serialized JSON frames)
pub type ClientSender = UnboundedSender<String>;

/// Result of removing a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// Members still in the room
    pub remaining: usize,
    /// Whether the room was deleted because it became empty
    pub room_removed: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Join `member` to the room, creating the room on first join.
    ///
    /// Returns the member count after the join.
    async fn join(
        &self,
        room_id: RoomId,
        member: Member,
        sender: ClientSender,
    ) -> Result<usize, RepositoryError>;

    /// Remove a member; deletes the room when the last member leaves.
    async fn leave(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<LeaveOutcome, RepositoryError>;

    /// Overwrite the buffer text. Returns the new revision.
    async fn replace_code(
        &self,
        room_id: &RoomId,
        from: &ConnectionId,
        code: String,
    ) -> Result<u64, RepositoryError>;

    /// Overwrite the language tag. Returns the new revision.
    async fn replace_language(
        &self,
        room_id: &RoomId,
        from: &ConnectionId,
        language: LanguageTag,
    ) -> Result<u64, RepositoryError>;

    /// Append a chat message and broadcast it to the whole room.
    async fn post_message(
        &self,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Result<(), RepositoryError>;

    /// Copy of the room's current state
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// Number of live rooms
    async fn count_rooms(&self) -> usize;
}
