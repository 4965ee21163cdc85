//! Core domain models for the collaborative room relay.

use std::collections::VecDeque;

use super::{
    error::RoomError,
    event::{Audience, Envelope, RoomEvent},
    value_object::{
        ConnectionId, DisplayName, LanguageTag, MessageContent, MessageId, RoomId, Timestamp,
    },
};

/// Buffer text a room starts with
pub const DEFAULT_CODE: &str = "// Start coding here...";

/// Default maximum number of messages kept in a room transcript
pub const DEFAULT_TRANSCRIPT_CAPACITY: usize = 100;

/// Represents a collaboration room: shared buffer, language, members and chat
///
/// A room only lives in the registry while it has at least one member.
#[derive(Debug, Clone)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Shared buffer text (last write wins)
    pub code: String,
    /// Shared language tag (last write wins)
    pub language: LanguageTag,
    /// Incremented on every accepted buffer or language update
    pub revision: u64,
    /// Members in join order (join order is display order)
    pub members: Vec<Member>,
    /// Bounded chat history
    pub transcript: Transcript,
    /// Timestamp when the room was created
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new empty room with the default buffer and language
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self::with_capacity(id, created_at, DEFAULT_TRANSCRIPT_CAPACITY)
    }

    /// Create a new empty room with a custom transcript capacity
    pub fn with_capacity(id: RoomId, created_at: Timestamp, transcript_capacity: usize) -> Self {
        Self {
            id,
            code: DEFAULT_CODE.to_string(),
            language: LanguageTag::default(),
            revision: 0,
            members: Vec::new(),
            transcript: Transcript::with_capacity(transcript_capacity),
            created_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Get a member by connection ID
    pub fn get_member(&self, connection_id: &ConnectionId) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| &m.connection_id == connection_id)
    }

    /// Add a member and build everything the join has to emit.
    ///
    /// Emits, in order: a welcome to the new member, the member list to
    /// everyone, the buffer/language snapshot to the new member, then the
    /// transcript to the new member oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::DuplicateConnection` if the connection already joined
    pub fn join(&mut self, member: Member) -> Result<Vec<Envelope>, RoomError> {
        if self.get_member(&member.connection_id).is_some() {
            return Err(RoomError::DuplicateConnection(
                member.connection_id.into_string(),
            ));
        }

        let connection_id = member.connection_id.clone();
        self.members.push(member);

        let mut envelopes = vec![
            Envelope::new(
                Audience::Only(connection_id.clone()),
                RoomEvent::Welcome {
                    room_id: self.id.clone(),
                    connection_id: connection_id.clone(),
                },
            ),
            self.member_list_update(),
        ];
        envelopes.extend(self.snapshot_for(&connection_id));
        envelopes.extend(self.history_for(&connection_id));
        Ok(envelopes)
    }

    /// Remove a member. The remaining members get the new list; an emptied
    /// room emits nothing.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::MemberNotFound` if the connection is not a member
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Result<Vec<Envelope>, RoomError> {
        let position = self
            .members
            .iter()
            .position(|m| &m.connection_id == connection_id)
            .ok_or_else(|| RoomError::MemberNotFound(connection_id.as_str().to_string()))?;
        self.members.remove(position);

        if self.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![self.member_list_update()])
    }

    /// Full member list addressed to everyone in the room
    pub fn member_list_update(&self) -> Envelope {
        Envelope::new(Audience::Everyone, RoomEvent::MemberList(self.members.clone()))
    }

    /// Buffer and language snapshot for a single member
    pub fn snapshot_for(&self, connection_id: &ConnectionId) -> Vec<Envelope> {
        vec![
            Envelope::new(
                Audience::Only(connection_id.clone()),
                RoomEvent::CodeChanged {
                    code: self.code.clone(),
                    revision: self.revision,
                },
            ),
            Envelope::new(
                Audience::Only(connection_id.clone()),
                RoomEvent::LanguageChanged {
                    language: self.language.clone(),
                    revision: self.revision,
                },
            ),
        ]
    }

    /// Stored transcript for a single member, oldest first
    pub fn history_for(&self, connection_id: &ConnectionId) -> Vec<Envelope> {
        self.transcript
            .iter()
            .map(|message| {
                Envelope::new(
                    Audience::Only(connection_id.clone()),
                    RoomEvent::ChatMessage(message.clone()),
                )
            })
            .collect()
    }

    /// Overwrite the buffer text. Everyone except the originator is told.
    pub fn replace_code(&mut self, from: &ConnectionId, code: String) -> Vec<Envelope> {
        self.code = code;
        self.revision += 1;
        vec![Envelope::new(
            Audience::EveryoneExcept(from.clone()),
            RoomEvent::CodeChanged {
                code: self.code.clone(),
                revision: self.revision,
            },
        )]
    }

    /// Overwrite the language tag. Everyone except the originator is told.
    pub fn replace_language(&mut self, from: &ConnectionId, language: LanguageTag) -> Vec<Envelope> {
        self.language = language;
        self.revision += 1;
        vec![Envelope::new(
            Audience::EveryoneExcept(from.clone()),
            RoomEvent::LanguageChanged {
                language: self.language.clone(),
                revision: self.revision,
            },
        )]
    }

    /// Append to the transcript and broadcast to everyone, sender included.
    pub fn post_message(&mut self, message: ChatMessage) -> Vec<Envelope> {
        self.transcript.push(message.clone());
        vec![Envelope::new(
            Audience::Everyone,
            RoomEvent::ChatMessage(message),
        )]
    }

    /// Resolve an audience against a snapshot of the current member list
    pub fn recipients(&self, audience: &Audience) -> Vec<ConnectionId> {
        match audience {
            Audience::Only(id) => self
                .get_member(id)
                .map(|m| vec![m.connection_id.clone()])
                .unwrap_or_default(),
            Audience::Everyone => self
                .members
                .iter()
                .map(|m| m.connection_id.clone())
                .collect(),
            Audience::EveryoneExcept(excluded) => self
                .members
                .iter()
                .filter(|m| &m.connection_id != excluded)
                .map(|m| m.connection_id.clone())
                .collect(),
        }
    }
}

/// Represents one connected client inside a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Connection identifier, unique within the room
    pub connection_id: ConnectionId,
    /// Name shown to other members (may collide)
    pub display_name: DisplayName,
}

impl Member {
    /// Create a new member
    pub fn new(connection_id: ConnectionId, display_name: DisplayName) -> Self {
        Self {
            connection_id,
            display_name,
        }
    }
}

/// Represents a chat message in the domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Message identifier
    pub id: MessageId,
    /// Author's connection ID
    pub author_id: ConnectionId,
    /// Author's display name at the time of sending
    pub author_name: DisplayName,
    /// Message body
    pub body: MessageContent,
    /// Relay-assigned timestamp
    pub sent_at: Timestamp,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(id: MessageId, author: &Member, body: MessageContent, sent_at: Timestamp) -> Self {
        Self {
            id,
            author_id: author.connection_id.clone(),
            author_name: author.display_name.clone(),
            body,
            sent_at,
        }
    }
}

/// Bounded FIFO of chat messages; the oldest entry is evicted on overflow
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: VecDeque<ChatMessage>,
    capacity: usize,
}

impl Transcript {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message, returning the evicted entry if the transcript was full
    pub fn push(&mut self, message: ChatMessage) -> Option<ChatMessage> {
        self.entries.push_back(message);
        if self.entries.len() > self.capacity {
            return self.entries.pop_front();
        }
        None
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter()
    }
}
