//! UseCase: セッション切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - 切断時の後始末（レジストリ削除、LeavingUser 通知、購読キャンセル）
//!
//! ### なぜこのテストが必要か
//! - 切断のトリガは複数ある（クライアント切断・トランスポートエラー・
//!   プロトコルエラー）。どれが先に発火しても後始末はちょうど 1 回で
//!   なければならない
//! - LeavingUser が二重に配信されると他クライアントの表示が壊れる
//!
//! ### どのような状況を想定しているか
//! - 正常系: 接続中セッションの切断と通知
//! - エッジケース: 同じセッションへの切断処理の重複実行

use std::sync::Arc;

use crate::domain::{BroadcastHub, Event, SessionId, SessionRegistry, Subscription};

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// 接続中セッションの集合
    registry: Arc<SessionRegistry>,
    /// fan-out を担う hub
    hub: Arc<BroadcastHub>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(registry: Arc<SessionRegistry>, hub: Arc<BroadcastHub>) -> Self {
        Self { registry, hub }
    }

    /// セッション切断を実行
    ///
    /// レジストリからの削除が実際に行われた呼び出しだけが `LeavingUser` を
    /// ブロードキャストする。レジストリのロックが競合する複数トリガを
    /// 調停するため、通知と削除はちょうど 1 回になる。購読のキャンセルと
    /// hub からの登録解除はもともと冪等。
    ///
    /// # Returns
    ///
    /// * `true` - このセッションがまだ接続中で、この呼び出しが後始末を行った
    /// * `false` - 既に切断処理済み
    pub fn execute(&self, session_id: &SessionId, subscription: &Subscription) -> bool {
        let was_active = self.registry.remove(session_id);
        if was_active {
            self.hub.publish(Event::LeavingUser(session_id.clone()));
            tracing::info!(session_id = %session_id, "session disconnected");
        }
        subscription.cancel();
        self.hub.unregister(session_id);
        was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BufferPolicy;
    use crate::usecase::ConnectSessionUseCase;

    fn create_usecases() -> (
        ConnectSessionUseCase,
        DisconnectSessionUseCase,
        Arc<SessionRegistry>,
        Arc<BroadcastHub>,
    ) {
        let registry = Arc::new(SessionRegistry::new());
        let hub = Arc::new(BroadcastHub::new(BufferPolicy::default()));
        (
            ConnectSessionUseCase::new(registry.clone(), hub.clone()),
            DisconnectSessionUseCase::new(registry.clone(), hub.clone()),
            registry,
            hub,
        )
    }

    #[test]
    fn test_disconnect_cleans_up_and_notifies() {
        // テスト項目: 切断でレジストリから削除され、他の購読に LeavingUser が届く
        // given (前提条件):
        let (connect, disconnect, registry, _hub) = create_usecases();
        let leaving_id = SessionId::generate();
        let (sub_leaving, _rx_leaving) = connect.execute(leaving_id.clone());
        let (sub_other, mut rx_other) = connect.execute(SessionId::generate());
        sub_other.request(10);
        let _ = rx_other.try_recv(); // 自分自身の join を読み捨てる

        // when (操作):
        let result = disconnect.execute(&leaving_id, &sub_leaving);

        // then (期待する結果):
        assert!(result);
        assert_eq!(registry.len(), 1);
        assert!(sub_leaving.is_cancelled());
        assert_eq!(
            rx_other.try_recv().unwrap(),
            Event::LeavingUser(leaving_id)
        );
    }

    #[test]
    fn test_disconnect_twice_notifies_exactly_once() {
        // テスト項目: 切断処理を重複実行しても LeavingUser はちょうど 1 回だけ
        // given (前提条件):
        let (connect, disconnect, _registry, _hub) = create_usecases();
        let leaving_id = SessionId::generate();
        let (sub_leaving, _rx_leaving) = connect.execute(leaving_id.clone());
        let (sub_other, mut rx_other) = connect.execute(SessionId::generate());
        sub_other.request(10);
        let _ = rx_other.try_recv(); // 自分自身の join を読み捨てる

        // when (操作): 「トランスポート切断」と「プロトコルエラー」の両方が発火した想定
        let first = disconnect.execute(&leaving_id, &sub_leaving);
        let second = disconnect.execute(&leaving_id, &sub_leaving);

        // then (期待する結果): LeavingUser は 1 件だけ
        assert!(first);
        assert!(!second);
        assert_eq!(
            rx_other.try_recv().unwrap(),
            Event::LeavingUser(leaving_id)
        );
        assert!(rx_other.try_recv().is_err());
    }

    #[test]
    fn test_concurrent_disconnect_triggers_notify_exactly_once() {
        // テスト項目: 並行する切断トリガでも後始末はちょうど 1 回
        // given (前提条件):
        let (connect, disconnect, registry, _hub) = create_usecases();
        let disconnect = Arc::new(disconnect);
        let leaving_id = SessionId::generate();
        let (sub_leaving, _rx_leaving) = connect.execute(leaving_id.clone());
        let (sub_observer, mut rx_observer) = connect.execute(SessionId::generate());
        sub_observer.request(100);
        let _ = rx_observer.try_recv(); // 自分自身の join を読み捨てる

        // when (操作): 複数スレッドから同時に切断処理を実行
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let disconnect = disconnect.clone();
                let session_id = leaving_id.clone();
                let subscription = sub_leaving.clone();
                std::thread::spawn(move || disconnect.execute(&session_id, &subscription))
            })
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // then (期待する結果): ちょうど 1 スレッドだけが後始末を行い、通知も 1 件だけ
        assert_eq!(results.iter().filter(|&&r| r).count(), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            rx_observer.try_recv().unwrap(),
            Event::LeavingUser(leaving_id)
        );
        assert!(rx_observer.try_recv().is_err());
    }
}
