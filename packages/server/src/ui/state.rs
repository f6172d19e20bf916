//! Server state and connection management.

use std::sync::Arc;

use crate::domain::{MessageStore, SessionRegistry};
use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, LoadMessagesUseCase, SendMessageUseCase,
    SendSnapshotUseCase,
};

/// Shared application state
///
/// Constructed once at startup and injected into every handler; no ambient
/// singletons.
pub struct AppState {
    /// ConnectSessionUseCase（セッション接続のユースケース）
    pub connect_session: Arc<ConnectSessionUseCase>,
    /// DisconnectSessionUseCase（セッション切断のユースケース）
    pub disconnect_session: Arc<DisconnectSessionUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message: Arc<SendMessageUseCase>,
    /// LoadMessagesUseCase（履歴再生のユースケース）
    pub load_messages: Arc<LoadMessagesUseCase>,
    /// SendSnapshotUseCase（スナップショット送信のユースケース）
    pub send_snapshot: Arc<SendSnapshotUseCase>,
    /// メッセージ履歴（HTTP の読み取りエンドポイント用）
    pub store: Arc<MessageStore>,
    /// 接続中セッションの集合（HTTP の読み取りエンドポイント用）
    pub registry: Arc<SessionRegistry>,
}
