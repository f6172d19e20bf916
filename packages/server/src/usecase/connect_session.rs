//! UseCase: セッション接続処理
//!
//! 接続が Active になる瞬間の処理。購読を hub に登録し、セッション ID を
//! レジストリに加え、`JoiningUser` をブロードキャストする。購読の登録が
//! 先なので、接続したセッション自身も自分の join イベントを受信する。

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{BroadcastHub, Event, SessionId, SessionRegistry, Subscription};

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    /// 接続中セッションの集合
    registry: Arc<SessionRegistry>,
    /// fan-out を担う hub
    hub: Arc<BroadcastHub>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(registry: Arc<SessionRegistry>, hub: Arc<BroadcastHub>) -> Self {
        Self { registry, hub }
    }

    /// セッション接続を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 接続受理時にトランスポート層が割り当てた ID
    ///
    /// # Returns
    ///
    /// 生成された購読と、その配信チャネルの受信側
    pub fn execute(
        &self,
        session_id: SessionId,
    ) -> (Arc<Subscription>, mpsc::UnboundedReceiver<Event>) {
        let (subscription, events_rx) = self.hub.register(session_id.clone());
        self.registry.add(session_id.clone());
        self.hub.publish(Event::JoiningUser(session_id.clone()));
        tracing::info!(session_id = %session_id, "session connected");
        (subscription, events_rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BufferPolicy;

    fn create_usecase() -> (
        ConnectSessionUseCase,
        Arc<SessionRegistry>,
        Arc<BroadcastHub>,
    ) {
        let registry = Arc::new(SessionRegistry::new());
        let hub = Arc::new(BroadcastHub::new(BufferPolicy::default()));
        (
            ConnectSessionUseCase::new(registry.clone(), hub.clone()),
            registry,
            hub,
        )
    }

    #[test]
    fn test_connect_registers_session_and_subscription() {
        // テスト項目: 接続するとレジストリと hub の両方に登録される
        // given (前提条件):
        let (usecase, registry, hub) = create_usecase();
        let session_id = SessionId::generate();

        // when (操作):
        let (_subscription, _events_rx) = usecase.execute(session_id.clone());

        // then (期待する結果):
        assert_eq!(registry.active_ids(), vec![session_id]);
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[test]
    fn test_connect_broadcasts_joining_user_including_self() {
        // テスト項目: 接続時に JoiningUser が全購読（自分自身を含む）に届く
        // given (前提条件):
        let (usecase, _registry, _hub) = create_usecase();
        let (sub_existing, mut rx_existing) = usecase.execute(SessionId::generate());
        sub_existing.request(10);
        let _ = rx_existing.try_recv(); // 自分自身の join を読み捨てる

        // when (操作):
        let new_id = SessionId::generate();
        let (sub_new, mut rx_new) = usecase.execute(new_id.clone());
        sub_new.request(10);

        // then (期待する結果): 既存・新規どちらの購読にも JoiningUser が届く
        assert_eq!(
            rx_existing.try_recv().unwrap(),
            Event::JoiningUser(new_id.clone())
        );
        assert_eq!(rx_new.try_recv().unwrap(), Event::JoiningUser(new_id));
    }
}
