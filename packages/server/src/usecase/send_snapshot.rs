//! UseCase: スナップショット送信処理
//!
//! `SendSnapshot` コマンドの適用。webcam のスナップショットを
//! `Event::VideoFrame` として全購読にブロードキャストする。
//! スナップショットは履歴に保存されない。

use std::sync::Arc;

use crate::domain::{BroadcastHub, Event, SessionId};

/// スナップショット送信のユースケース
pub struct SendSnapshotUseCase {
    /// fan-out を担う hub
    hub: Arc<BroadcastHub>,
}

impl SendSnapshotUseCase {
    /// 新しい SendSnapshotUseCase を作成
    pub fn new(hub: Arc<BroadcastHub>) -> Self {
        Self { hub }
    }

    /// スナップショット送信を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - スナップショットの送信元セッション
    /// * `user` - 送信者の表示名
    /// * `frame` - 画像データ（data URI 文字列）
    /// * `rotation` - 回転角（度）
    pub fn execute(&self, session_id: SessionId, user: String, frame: String, rotation: i32) {
        self.hub.publish(Event::VideoFrame {
            session_id,
            user,
            frame,
            rotation,
        });
    }
}
