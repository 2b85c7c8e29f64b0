//! In-memory store implementations.

pub mod directory;
pub mod message;

pub use directory::InMemoryRoomDirectory;
pub use message::InMemoryMessageStore;
