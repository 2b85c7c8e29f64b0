//! Room-scoped WebSocket chat relay.
//!
//! Clients connect over a single WebSocket endpoint, join named rooms, and
//! exchange messages that are persisted and fanned out to room members.
//! Layered as domain / usecase / infrastructure / ui.

pub mod config;
pub mod domain;
pub mod fanout;
pub mod infrastructure;
pub mod logger;
pub mod registry;
pub mod time;
pub mod ui;
pub mod usecase;

// Re-export the entry point
pub use ui::run;
