//! 全購読への fan-out を担う BroadcastHub
//!
//! ## 責務
//!
//! イベントのプロデューサとコンシューマを分離する単一の fan-out 点。
//! 接続の開始・終了に合わせて購読（`Subscription`）を生成・破棄し、
//! `publish` で全購読にイベントを届ける。
//!
//! ## 保証
//!
//! - 同一プロデューサが順に publish した 2 つのイベントは、どの購読でも
//!   その順で観測される（per-producer FIFO）
//! - 1 回の publish につき各購読への配達は高々 1 回
//! - 1 つの購読の失敗（キャンセル・受信側破棄）は他の購読への配達を妨げない

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use super::entity::Event;
use super::subscription::{BufferPolicy, Subscription};
use super::value_object::SessionId;

/// Single point of fan-out for broadcast events.
///
/// Constructed once at process start and injected into each connection
/// handler; holds the set of live subscriptions.
pub struct BroadcastHub {
    policy: BufferPolicy,
    subscriptions: Mutex<Vec<Arc<Subscription>>>,
}

impl BroadcastHub {
    pub fn new(policy: BufferPolicy) -> Self {
        Self {
            policy,
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// Create a new subscription for `session_id`, add it to the live set and
    /// hand back the subscription together with its delivery channel.
    ///
    /// Called once per accepted connection.
    pub fn register(
        &self,
        session_id: SessionId,
    ) -> (Arc<Subscription>, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = Arc::new(Subscription::new(session_id.clone(), tx, self.policy));
        self.lock().push(subscription.clone());
        tracing::debug!(session_id = %session_id, "subscription registered");
        (subscription, rx)
    }

    /// Remove the subscription for `session_id` from the live set.
    ///
    /// Idempotent: safe to call more than once or after the subscription
    /// already cancelled itself.
    pub fn unregister(&self, session_id: &SessionId) {
        let mut subscriptions = self.lock();
        let before = subscriptions.len();
        subscriptions.retain(|subscription| subscription.id() != session_id);
        if subscriptions.len() < before {
            tracing::debug!(session_id = %session_id, "subscription unregistered");
        }
    }

    /// Deliver `event` to every currently registered subscription.
    ///
    /// Never blocks on a slow consumer: each subscription only buffers the
    /// event under its own lock. Cancelled subscriptions are reaped here and
    /// skipped; a dead subscription never prevents delivery to the rest.
    pub fn publish(&self, event: Event) {
        let subscriptions: Vec<Arc<Subscription>> = {
            let mut subscriptions = self.lock();
            subscriptions.retain(|subscription| !subscription.is_cancelled());
            subscriptions.clone()
        };
        for subscription in subscriptions {
            subscription.enqueue(event.clone());
        }
    }

    /// Number of live subscriptions (cancelled ones may still be counted
    /// until the next publish reaps them)
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Arc<Subscription>>> {
        self.subscriptions
            .lock()
            .expect("subscription set lock poisoned")
    }
}
