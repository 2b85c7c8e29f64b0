//! WebSocket relay server implementation.

mod handler;
mod runner;
pub mod state;

pub use runner::run;
