//! Value objects for the broadcast domain.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// SessionId 生成・検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionIdError {
    /// 空の SessionId は許可されない
    #[error("SessionId must not be empty")]
    Empty,
}

/// Opaque identifier for one client connection.
///
/// Assigned by the transport layer at connection-accept time and unique for
/// the connection's lifetime. Server-generated ids are UUID v4; ids arriving
/// on the wire (e.g. in a snapshot command) only need to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a SessionId from an existing string, validating it is non-empty
    pub fn new(value: String) -> Result<Self, SessionIdError> {
        if value.is_empty() {
            return Err(SessionIdError::Empty);
        }
        Ok(Self(value))
    }

    /// Generate a fresh SessionId for a newly accepted connection
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_new_accepts_non_empty() {
        // テスト項目: 空でない文字列から SessionId が生成できる
        // given (前提条件):
        let raw = "session-1".to_string();

        // when (操作):
        let result = SessionId::new(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "session-1");
    }

    #[test]
    fn test_session_id_new_rejects_empty() {
        // テスト項目: 空文字列からの SessionId 生成はエラーになる
        // given (前提条件):
        let raw = String::new();

        // when (操作):
        let result = SessionId::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(SessionIdError::Empty));
    }

    #[test]
    fn test_session_id_generate_is_unique() {
        // テスト項目: generate が毎回異なる SessionId を返す
        // given (前提条件):

        // when (操作):
        let id1 = SessionId::generate();
        let id2 = SessionId::generate();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }
}
