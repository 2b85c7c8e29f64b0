//! Data transfer objects for the wire protocol.

pub mod http;
pub mod websocket;
