//! 需要（demand）ベースのバックプレッシャ付き配信チャネル
//!
//! ## 概要
//!
//! コンシューマ（接続ごとの送信タスク）は `request(n)` で「あと n 件受け取れる」
//! と宣言し、プロデューサは `enqueue` でイベントを積む。配信は未消化の需要が
//! ある間だけ行われ、FIFO 順・高々 1 回。トランスポートに依存しない
//! フロー制御のプリミティブとして実装する。
//!
//! ## 同期
//!
//! キュー・需要カウンタ・キャンセルフラグは 1 つの短命な排他区間
//! （`std::sync::Mutex`）で守る。配信シンクは `UnboundedSender` なので
//! ロック中の送信がブロックすることはない。

use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::mpsc;

use super::entity::Event;
use super::value_object::SessionId;

/// バッファ上限超過時の回復方針
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// 最も古いバッファ済みイベントを破棄する
    DropOldest,
    /// 購読をキャンセルする（接続は切断される）
    Disconnect,
}

/// 購読ごとのバッファ方針
///
/// コンシューマが `request` を呼ばない限り `pending` は伸び続けるため、
/// 上限とその超過時の扱いを設定として明示する。
#[derive(Debug, Clone, Copy)]
pub struct BufferPolicy {
    /// バッファ可能なイベント数の上限
    pub max_buffered: usize,
    /// 上限超過時の方針
    pub on_overflow: OverflowPolicy,
}

impl Default for BufferPolicy {
    fn default() -> Self {
        Self {
            max_buffered: 1024,
            on_overflow: OverflowPolicy::DropOldest,
        }
    }
}

struct Inner {
    pending: VecDeque<Event>,
    demand: usize,
    cancelled: bool,
    /// 配信先。キャンセル時に破棄され、受信側のチャネルが閉じる。
    sink: Option<mpsc::UnboundedSender<Event>>,
}

/// Per-consumer demand-tracked delivery channel.
///
/// Owned by the `BroadcastHub` for fan-out and by one connection's outbound
/// task for draining; both sides may call into it concurrently.
pub struct Subscription {
    id: SessionId,
    policy: BufferPolicy,
    inner: Mutex<Inner>,
}

impl Subscription {
    pub(crate) fn new(
        id: SessionId,
        sink: mpsc::UnboundedSender<Event>,
        policy: BufferPolicy,
    ) -> Self {
        Self {
            id,
            policy,
            inner: Mutex::new(Inner {
                pending: VecDeque::new(),
                demand: 0,
                cancelled: false,
                sink: Some(sink),
            }),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Producer side: append an event, then deliver eagerly if demand is
    /// already outstanding.
    ///
    /// No-op once cancelled. Applies the buffer policy when the pending
    /// queue exceeds its configured bound.
    pub fn enqueue(&self, event: Event) {
        let mut inner = self.lock();
        if inner.cancelled {
            return;
        }

        inner.pending.push_back(event);
        if inner.pending.len() > self.policy.max_buffered {
            match self.policy.on_overflow {
                OverflowPolicy::DropOldest => {
                    inner.pending.pop_front();
                    tracing::warn!(
                        session_id = %self.id,
                        max_buffered = self.policy.max_buffered,
                        "subscription buffer full, dropped oldest event"
                    );
                }
                OverflowPolicy::Disconnect => {
                    tracing::warn!(
                        session_id = %self.id,
                        max_buffered = self.policy.max_buffered,
                        "subscription buffer full, cancelling subscription"
                    );
                    Self::cancel_locked(&mut inner);
                    return;
                }
            }
        }

        Self::drain_locked(&self.id, &mut inner);
    }

    /// Consumer side: state readiness to accept `n` additional events, then
    /// drain as many buffered events as the new demand allows, in FIFO order.
    pub fn request(&self, n: usize) {
        let mut inner = self.lock();
        if inner.cancelled {
            return;
        }
        inner.demand = inner.demand.saturating_add(n);
        Self::drain_locked(&self.id, &mut inner);
    }

    /// Mark the subscription terminal. Subsequent `enqueue`/`request` become
    /// no-ops; the delivery channel is closed. Idempotent.
    pub fn cancel(&self) {
        let mut inner = self.lock();
        Self::cancel_locked(&mut inner);
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// Number of buffered, not yet delivered events
    pub fn buffered(&self) -> usize {
        self.lock().pending.len()
    }

    /// Currently outstanding demand
    pub fn demand(&self) -> usize {
        self.lock().demand
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("subscription state lock poisoned")
    }

    fn cancel_locked(inner: &mut Inner) {
        inner.cancelled = true;
        inner.pending.clear();
        inner.demand = 0;
        inner.sink = None;
    }

    /// Release at most `demand` buffered events to the sink, decrementing
    /// demand by the number released. A dropped receiver counts as
    /// cancellation: the consumer's connection is gone.
    fn drain_locked(id: &SessionId, inner: &mut Inner) {
        while inner.demand > 0 {
            let Some(event) = inner.pending.pop_front() else {
                break;
            };
            let delivered = match &inner.sink {
                Some(sink) => sink.send(event).is_ok(),
                None => false,
            };
            if !delivered {
                tracing::debug!(session_id = %id, "event sink closed, cancelling subscription");
                Self::cancel_locked(inner);
                return;
            }
            inner.demand -= 1;
        }
    }
}
