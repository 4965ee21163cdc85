//! Domain factories for creating identifiers the relay assigns itself.

use super::{ConnectionId, MessageId};

/// Factory for generating ConnectionId instances.
///
/// Every accepted WebSocket connection gets a fresh id, so a reconnecting
/// client is a new member even if it reuses its display name.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for chat message ids, used when a client does not supply one.
pub struct MessageIdFactory;

impl MessageIdFactory {
    pub fn generate() -> MessageId {
        MessageId::from_uuid(uuid::Uuid::new_v4())
    }
}
