//! WebSocket wire unions and the JSON codec.
//!
//! Inbound commands and outbound events are tagged unions discriminated by
//! `type`. Decoding an unknown `type` (or malformed JSON) yields a
//! `DecodeError`, never a panic, and is surfaced to the offending
//! connection only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 受信ペイロードの解読エラー
#[derive(Debug, Error)]
pub enum DecodeError {
    /// 不正な JSON、または未知の `type` を持つペイロード
    #[error("unsupported or malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Inbound command union, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireCommand {
    AddMessage {
        message: String,
        user: String,
    },
    LoadMessages,
    SendSnapshot {
        #[serde(rename = "sessionId")]
        session_id: String,
        user: String,
        frame: String,
        rotation: i32,
    },
}

/// Outbound event union, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireEvent {
    Message {
        id: String,
        #[serde(rename = "createdAt")]
        created_at: String,
        user: String,
        message: String,
    },
    VideoFrame {
        #[serde(rename = "sessionId")]
        session_id: String,
        user: String,
        frame: String,
        rotation: i32,
    },
    JoiningUser {
        joining: String,
    },
    LeavingUser {
        leaving: String,
    },
}

/// Decode one inbound text payload into a command
pub fn decode(text: &str) -> Result<WireCommand, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

/// Encode one outbound event as a text payload
pub fn encode(event: &WireEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}
