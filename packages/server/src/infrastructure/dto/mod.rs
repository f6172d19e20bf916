//! Data Transfer Objects (DTOs) for the chat application.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket wire unions and the JSON codec
//! - `conversion`: domain entity → DTO mapping

pub mod conversion;
pub mod websocket;

pub use websocket::{DecodeError, WireCommand, WireEvent, decode, encode};
