//! Shared utilities for the Chanoma chat application.
//!
//! Cross-cutting concerns used by the server crate: logging setup and
//! time/clock abstraction.

pub mod logger;
pub mod time;
