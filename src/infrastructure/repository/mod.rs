//! Store implementations.
//!
//! The domain layer defines the store traits; the implementations here are
//! what the server wires in. UseCases depend on the traits only.

pub mod inmemory;

pub use inmemory::{InMemoryMessageStore, InMemoryRoomDirectory};
