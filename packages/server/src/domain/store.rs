//! 容量制限付きメッセージ履歴
//!
//! チャットメッセージの追記専用履歴。新規参加者が「参加時点までの会話」を
//! 再生するための唯一の情報源。容量を超えた分は先頭（最古）から追い出す。

use std::collections::VecDeque;
use std::sync::Mutex;

use super::entity::Message;

/// 履歴のデフォルト容量
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Bounded, append-only history of chat messages (FIFO eviction).
///
/// Created once at process start; mutated only through `append`.
pub struct MessageStore {
    capacity: usize,
    messages: Mutex<VecDeque<Message>>,
}

impl MessageStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            messages: Mutex::new(VecDeque::new()),
        }
    }

    /// Insert a message at the tail, evicting from the head once the
    /// capacity is exceeded. O(1) amortized.
    ///
    /// Timestamps are kept monotonically non-decreasing in insertion order:
    /// a message carrying an earlier wall-clock time than the current tail
    /// is clamped to the tail's timestamp. Returns the message as stored.
    pub fn append(&self, mut message: Message) -> Message {
        let mut messages = self.lock();
        if let Some(last) = messages.back()
            && message.created_at < last.created_at
        {
            message.created_at = last.created_at;
        }
        messages.push_back(message.clone());
        while messages.len() > self.capacity {
            messages.pop_front();
        }
        message
    }

    /// Consistent snapshot of the current history, oldest first
    pub fn all(&self) -> Vec<Message> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Message>> {
        self.messages.lock().expect("message history lock poisoned")
    }
}
