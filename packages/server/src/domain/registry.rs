//! 接続中セッションの集合
//!
//! エントリは接続受理時に作られ、接続終了（異常終了を含む）時に削除される。
//! `add` / `remove` は集合を実際に変更したかどうかを返す。切断処理の
//! 「ちょうど 1 回」保証はこの戻り値に依存している（`DisconnectSessionUseCase`）。

use std::sync::Mutex;

use super::value_object::SessionId;

/// Set of currently active connection identifiers.
///
/// Insertion order is preserved so that presence replay is deterministic.
pub struct SessionRegistry {
    sessions: Mutex<Vec<SessionId>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
        }
    }

    /// Add a session id. Returns `false` if it was already registered.
    pub fn add(&self, session_id: SessionId) -> bool {
        let mut sessions = self.lock();
        if sessions.contains(&session_id) {
            return false;
        }
        sessions.push(session_id);
        true
    }

    /// Remove a session id. Returns `true` only if it was present;
    /// removing a non-member is a no-op (supports idempotent cleanup).
    pub fn remove(&self, session_id: &SessionId) -> bool {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|id| id != session_id);
        sessions.len() < before
    }

    /// Snapshot of the active session ids, in join order
    pub fn active_ids(&self) -> Vec<SessionId> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SessionId>> {
        self.sessions.lock().expect("session registry lock poisoned")
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
