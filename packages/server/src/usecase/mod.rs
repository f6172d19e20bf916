//! ユースケース層
//!
//! 受信コマンドと接続ライフサイクルの 1 操作につき 1 ユースケース。
//! ドメイン層の構成要素（hub / store / registry）を組み合わせるだけで、
//! トランスポートや wire 形式には依存しない。

mod connect_session;
mod disconnect_session;
mod load_messages;
mod send_message;
mod send_snapshot;

pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use load_messages::LoadMessagesUseCase;
pub use send_message::SendMessageUseCase;
pub use send_snapshot::SendSnapshotUseCase;
