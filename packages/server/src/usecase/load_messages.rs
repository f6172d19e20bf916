//! UseCase: 履歴・在席状況の再生
//!
//! `LoadMessages` コマンドの適用。遅れて参加したクライアントが現在の状態を
//! 再構築できるよう、履歴の全メッセージ（挿入順）に続けて、接続中の全
//! セッションぶんの `JoiningUser` を直接返信として返す。ブロードキャストは
//! 行わない。
//!
//! 呼び出したセッション自身も（この時点で登録済みなので）`JoiningUser` に
//! 含まれる。

use std::sync::Arc;

use crate::domain::{Event, MessageStore, SessionRegistry};

/// 履歴再生のユースケース
pub struct LoadMessagesUseCase {
    /// メッセージ履歴
    store: Arc<MessageStore>,
    /// 接続中セッションの集合
    registry: Arc<SessionRegistry>,
}

impl LoadMessagesUseCase {
    /// 新しい LoadMessagesUseCase を作成
    pub fn new(store: Arc<MessageStore>, registry: Arc<SessionRegistry>) -> Self {
        Self { store, registry }
    }

    /// 履歴再生を実行
    ///
    /// # Returns
    ///
    /// 直接返信するイベント列: 履歴の全メッセージ（最古が先頭）＋
    /// 接続中セッションごとの `JoiningUser`（参加順）
    pub fn execute(&self) -> Vec<Event> {
        self.store
            .all()
            .into_iter()
            .map(Event::Message)
            .chain(
                self.registry
                    .active_ids()
                    .into_iter()
                    .map(Event::JoiningUser),
            )
            .collect()
    }
}
