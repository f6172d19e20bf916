//! UI layer: WebSocket/HTTP transport and server wiring.

pub mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
