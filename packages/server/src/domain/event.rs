//! Outbound room events and who receives them.
//!
//! Room operations never touch connections directly. They return a list of
//! [`Envelope`]s which the repository delivers, in order, while it still holds
//! the registry lock.

use super::{ChatMessage, ConnectionId, LanguageTag, Member, RoomId};

/// Recipients of an envelope, resolved against the member list at delivery time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// A single member
    Only(ConnectionId),
    /// Every member, the originator included
    Everyone,
    /// Every member except the originator
    EveryoneExcept(ConnectionId),
}

/// Something a room tells its members
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// Tells a new member its own connection id
    Welcome {
        room_id: RoomId,
        connection_id: ConnectionId,
    },
    /// Full ordered member list
    MemberList(Vec<Member>),
    /// Current buffer text
    CodeChanged { code: String, revision: u64 },
    /// Current language tag
    LanguageChanged {
        language: LanguageTag,
        revision: u64,
    },
    /// One transcript entry, carrying the relay timestamp
    ChatMessage(ChatMessage),
}

/// An event addressed to an audience
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub audience: Audience,
    pub event: RoomEvent,
}

impl Envelope {
    pub fn new(audience: Audience, event: RoomEvent) -> Self {
        Self { audience, event }
    }
}
