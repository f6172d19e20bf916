//! Chat server library for Chanoma.
//!
//! Real-time fan-out broadcast engine: many concurrently connected clients
//! exchange short text messages and periodic webcam snapshots, every client
//! seeing every message and the latest snapshot from every other session.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
