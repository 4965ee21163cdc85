//! Domain layer for the room relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Member, Room, Transcript};
pub use error::{RepositoryError, RoomError, ValueObjectError};
pub use event::{Audience, Envelope, RoomEvent};
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use repository::{ClientSender, LeaveOutcome, RoomRepository};
pub use value_object::{
    ConnectionId, DisplayName, LanguageTag, MessageContent, MessageId, RoomId, Timestamp,
};
