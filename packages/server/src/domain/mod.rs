//! ドメイン層
//!
//! ブロードキャストエンジンの中核。I/O を持たない純粋な構成要素のみを置く：
//!
//! - `entity`: `Message`（チャットメッセージ）と `Event`（ブロードキャスト対象の事実）
//! - `value_object`: `SessionId`
//! - `subscription`: 需要（demand）ベースのバックプレッシャ付き配信チャネル
//! - `hub`: 全購読への fan-out を担う `BroadcastHub`
//! - `store`: 容量制限付きメッセージ履歴 `MessageStore`
//! - `registry`: 接続中セッションの集合 `SessionRegistry`

pub mod entity;
pub mod hub;
pub mod registry;
pub mod store;
pub mod subscription;
pub mod value_object;

pub use entity::{Event, Message};
pub use hub::BroadcastHub;
pub use registry::SessionRegistry;
pub use store::{DEFAULT_HISTORY_CAPACITY, MessageStore};
pub use subscription::{BufferPolicy, OverflowPolicy, Subscription};
pub use value_object::{SessionId, SessionIdError};
