//! Room Registry: room id → room state plus the outbound queues of its members.
//!
//! Plain synchronous data structure. Callers serialize access (the in-memory
//! repository keeps it behind a single mutex).

use std::collections::HashMap;

use crate::{
    domain::{
        ClientSender, ConnectionId, Envelope, RepositoryError, Room, RoomId, Timestamp,
        entity::DEFAULT_TRANSCRIPT_CAPACITY,
    },
    infrastructure::dto::websocket::ServerEvent,
};

/// A live room and the connections it delivers to
pub struct RoomSlot {
    pub room: Room,
    senders: HashMap<ConnectionId, ClientSender>,
}

impl RoomSlot {
    fn new(room: Room) -> Self {
        Self {
            room,
            senders: HashMap::new(),
        }
    }

    pub fn attach(&mut self, connection_id: ConnectionId, sender: ClientSender) {
        self.senders.insert(connection_id, sender);
    }

    pub fn detach(&mut self, connection_id: &ConnectionId) {
        self.senders.remove(connection_id);
    }

    /// Queue every envelope to its recipients, in order.
    ///
    /// Recipients are resolved against a snapshot of the member list. A closed
    /// queue is logged and skipped; it never affects other recipients.
    /// Returns the number of frames queued.
    pub fn deliver(&self, envelopes: Vec<Envelope>) -> usize {
        let mut delivered = 0;
        for envelope in envelopes {
            let recipients = self.room.recipients(&envelope.audience);
            if recipients.is_empty() {
                continue;
            }

            let frame = match serde_json::to_string(&ServerEvent::from(&envelope.event)) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!("Failed to serialize frame for room '{}': {}", self.room.id, e);
                    continue;
                }
            };

            for connection_id in recipients {
                match self.senders.get(&connection_id) {
                    Some(sender) if sender.send(frame.clone()).is_ok() => delivered += 1,
                    _ => tracing::warn!(
                        "Failed to queue frame to connection '{}' in room '{}'",
                        connection_id,
                        self.room.id
                    ),
                }
            }
        }
        delivered
    }
}

/// Registry of live rooms
pub struct RoomRegistry {
    rooms: HashMap<RoomId, RoomSlot>,
    transcript_capacity: usize,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::with_transcript_capacity(DEFAULT_TRANSCRIPT_CAPACITY)
    }

    /// Registry whose new rooms keep at most `transcript_capacity` messages
    pub fn with_transcript_capacity(transcript_capacity: usize) -> Self {
        Self {
            rooms: HashMap::new(),
            transcript_capacity,
        }
    }

    /// Return the room, creating it with default buffer and language if absent
    pub fn get_or_create(&mut self, room_id: &RoomId) -> &mut RoomSlot {
        let capacity = self.transcript_capacity;
        self.rooms.entry(room_id.clone()).or_insert_with(|| {
            tracing::info!("Room '{}' created", room_id);
            RoomSlot::new(Room::with_capacity(
                room_id.clone(),
                Timestamp::now(),
                capacity,
            ))
        })
    }

    pub fn get(&self, room_id: &RoomId) -> Result<&RoomSlot, RepositoryError> {
        self.rooms
            .get(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))
    }

    pub fn get_mut(&mut self, room_id: &RoomId) -> Result<&mut RoomSlot, RepositoryError> {
        self.rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))
    }

    /// Drop a room. Only called once its last member has left.
    pub fn remove(&mut self, room_id: &RoomId) -> Option<Room> {
        let slot = self.rooms.remove(room_id)?;
        let lifetime_ms = Timestamp::now().value() - slot.room.created_at.value();
        tracing::info!("Room '{}' is empty, removed (open for {} ms)", room_id, lifetime_ms);
        Some(slot.room)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
