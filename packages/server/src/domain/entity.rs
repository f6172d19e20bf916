//! Domain entities: chat messages and broadcastable events.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_object::SessionId;

/// Immutable chat message record.
///
/// Created by the command handler on receipt of an `AddMessage` command,
/// never mutated afterwards, destroyed only by eviction from the
/// `MessageStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub user: String,
    pub text: String,
}

impl Message {
    pub fn new(created_at: DateTime<Utc>, user: String, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            user,
            text,
        }
    }
}

/// Broadcastable fact fanned out to every subscription.
///
/// Events are ephemeral; only `Message` is also durable (in `MessageStore`).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A chat message was added
    Message(Message),
    /// A webcam snapshot from one session (never stored)
    VideoFrame {
        session_id: SessionId,
        user: String,
        frame: String,
        rotation: i32,
    },
    /// A session joined
    JoiningUser(SessionId),
    /// A session left
    LeavingUser(SessionId),
}
