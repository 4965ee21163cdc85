//! In-memory storage. All state is lost when the process exits.

pub mod registry;
pub mod room;

pub use registry::{RoomRegistry, RoomSlot};
pub use room::InMemoryRoomRepository;
