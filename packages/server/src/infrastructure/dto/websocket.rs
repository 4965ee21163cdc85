//! WebSocket frame DTOs for the room relay.
//!
//! Every frame is a JSON object tagged by a kebab-case `type` field with
//! camelCase payload fields.

use serde::{Deserialize, Serialize};

use kyoyu_shared::time::timestamp_to_utc_rfc3339;

use crate::domain::{ChatMessage as DomainChatMessage, Member, RoomEvent};

/// Frames sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    CodeChange { room_id: String, code: String },
    LanguageChange { room_id: String, language: String },
    ChatMessage {
        room_id: String,
        message: IncomingChatMessage,
    },
}

/// Chat payload as sent by a client
///
/// `user_id` / `user_name` are accepted for compatibility but the relay uses
/// the identity bound at handshake instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingChatMessage {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub text: String,
}

/// Frames sent by the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    Connected { id: String, room_id: String },
    UserListUpdate { users: Vec<UserInfo> },
    CodeChange { code: String, revision: u64 },
    LanguageChange { language: String, revision: u64 },
    ChatMessage { message: OutgoingChatMessage },
}

/// Member entry of a `user-list-update`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
}

/// Chat message as broadcast by the relay, including the relay timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingChatMessage {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub text: String,
    /// RFC 3339, UTC
    pub timestamp: String,
}

impl From<&Member> for UserInfo {
    fn from(member: &Member) -> Self {
        Self {
            id: member.connection_id.as_str().to_string(),
            name: member.display_name.as_str().to_string(),
        }
    }
}

impl From<&DomainChatMessage> for OutgoingChatMessage {
    fn from(message: &DomainChatMessage) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            user_id: message.author_id.as_str().to_string(),
            user_name: message.author_name.as_str().to_string(),
            text: message.body.as_str().to_string(),
            timestamp: timestamp_to_utc_rfc3339(message.sent_at.value()),
        }
    }
}

impl From<&RoomEvent> for ServerEvent {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::Welcome {
                room_id,
                connection_id,
            } => ServerEvent::Connected {
                id: connection_id.as_str().to_string(),
                room_id: room_id.as_str().to_string(),
            },
            RoomEvent::MemberList(members) => ServerEvent::UserListUpdate {
                users: members.iter().map(UserInfo::from).collect(),
            },
            RoomEvent::CodeChanged { code, revision } => ServerEvent::CodeChange {
                code: code.clone(),
                revision: *revision,
            },
            RoomEvent::LanguageChanged { language, revision } => ServerEvent::LanguageChange {
                language: language.as_str().to_string(),
                revision: *revision,
            },
            RoomEvent::ChatMessage(message) => ServerEvent::ChatMessage {
                message: OutgoingChatMessage::from(message),
            },
        }
    }
}
