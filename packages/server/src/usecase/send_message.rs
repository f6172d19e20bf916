//! UseCase: メッセージ送信処理
//!
//! `AddMessage` コマンドの適用。メッセージを組み立てて履歴に追加し、
//! `Event::Message` として全購読（送信者自身を含む）にブロードキャストする。
//! 直接の返信は生成しない。配達は fan-out 経由でのみ行われる。

use std::sync::Arc;

use chanoma_shared::time::Clock;

use crate::domain::{BroadcastHub, Event, Message, MessageStore};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// メッセージ履歴
    store: Arc<MessageStore>,
    /// fan-out を担う hub
    hub: Arc<BroadcastHub>,
    /// タイムスタンプ取得用の clock（テストでは FixedClock を注入）
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(store: Arc<MessageStore>, hub: Arc<BroadcastHub>, clock: Arc<dyn Clock>) -> Self {
        Self { store, hub, clock }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `user` - 送信者の表示名
    /// * `text` - メッセージ本文
    ///
    /// # Returns
    ///
    /// 履歴に格納された形のメッセージ（タイムスタンプは単調性のため
    /// 切り上げられている可能性がある）
    pub fn execute(&self, user: String, text: String) -> Message {
        let message = Message::new(self.clock.now(), user, text);
        let stored = self.store.append(message);
        self.hub.publish(Event::Message(stored.clone()));
        stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanoma_shared::time::FixedClock;

    use crate::domain::{BufferPolicy, SessionId};

    fn create_usecase() -> (SendMessageUseCase, Arc<MessageStore>, Arc<BroadcastHub>) {
        let store = Arc::new(MessageStore::new(100));
        let hub = Arc::new(BroadcastHub::new(BufferPolicy::default()));
        let clock = Arc::new(FixedClock::from_millis(1672531200000));
        (
            SendMessageUseCase::new(store.clone(), hub.clone(), clock),
            store,
            hub,
        )
    }

    #[test]
    fn test_send_message_appends_to_history() {
        // テスト項目: 送信したメッセージが履歴に追加される
        // given (前提条件):
        let (usecase, store, _hub) = create_usecase();

        // when (操作):
        let message = usecase.execute("alice".to_string(), "hi".to_string());

        // then (期待する結果):
        let all = store.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], message);
        assert_eq!(all[0].user, "alice");
        assert_eq!(all[0].text, "hi");
        assert_eq!(all[0].created_at.timestamp_millis(), 1672531200000);
    }

    #[test]
    fn test_send_message_broadcasts_to_all_including_sender() {
        // テスト項目: メッセージイベントが送信者自身の購読にも届く
        // given (前提条件):
        let (usecase, _store, hub) = create_usecase();
        let (sub_sender, mut rx_sender) = hub.register(SessionId::generate());
        let (sub_other, mut rx_other) = hub.register(SessionId::generate());
        sub_sender.request(10);
        sub_other.request(10);

        // when (操作):
        let message = usecase.execute("alice".to_string(), "hi".to_string());

        // then (期待する結果): 両方の購読に同じ Message イベントが届く
        assert_eq!(rx_sender.try_recv().unwrap(), Event::Message(message.clone()));
        assert_eq!(rx_other.try_recv().unwrap(), Event::Message(message));
    }

    #[test]
    fn test_send_message_produces_no_direct_reply() {
        // テスト項目: execute は履歴・fan-out 以外の副作用（直接返信）を持たない
        // given (前提条件):
        let (usecase, store, hub) = create_usecase();

        // when (操作): 購読がない状態で送信
        usecase.execute("alice".to_string(), "hi".to_string());

        // then (期待する結果): 履歴には入るが、他に何も起きない
        assert_eq!(store.len(), 1);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
