//! Conversion logic between domain entities and wire DTOs.

use chanoma_shared::time::to_rfc3339;

use crate::domain::{Event, Message};
use crate::infrastructure::dto::websocket::WireEvent;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Message> for WireEvent {
    fn from(message: Message) -> Self {
        WireEvent::Message {
            id: message.id.to_string(),
            created_at: to_rfc3339(message.created_at),
            user: message.user,
            message: message.text,
        }
    }
}

impl From<Event> for WireEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Message(message) => message.into(),
            Event::VideoFrame {
                session_id,
                user,
                frame,
                rotation,
            } => WireEvent::VideoFrame {
                session_id: session_id.into_string(),
                user,
                frame,
                rotation,
            },
            Event::JoiningUser(session_id) => WireEvent::JoiningUser {
                joining: session_id.into_string(),
            },
            Event::LeavingUser(session_id) => WireEvent::LeavingUser {
                leaving: session_id.into_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::domain::SessionId;

    #[test]
    fn test_domain_message_to_wire_event() {
        // テスト項目: ドメインの Message が wire イベントに変換される
        // given (前提条件):
        let created_at = Utc.timestamp_millis_opt(1672531200000).single().unwrap();
        let message = Message::new(created_at, "alice".to_string(), "hi".to_string());
        let id = message.id;

        // when (操作):
        let wire: WireEvent = Event::Message(message).into();

        // then (期待する結果): id は文字列化され、時刻は RFC 3339 になる
        assert_eq!(
            wire,
            WireEvent::Message {
                id: id.to_string(),
                created_at: "2023-01-01T00:00:00+00:00".to_string(),
                user: "alice".to_string(),
                message: "hi".to_string(),
            }
        );
    }

    #[test]
    fn test_domain_presence_events_to_wire_events() {
        // テスト項目: JoiningUser / LeavingUser がセッション ID 文字列を運ぶ
        // given (前提条件):
        let session_id = SessionId::new("s-1".to_string()).unwrap();

        // when (操作):
        let joining: WireEvent = Event::JoiningUser(session_id.clone()).into();
        let leaving: WireEvent = Event::LeavingUser(session_id).into();

        // then (期待する結果):
        assert_eq!(
            joining,
            WireEvent::JoiningUser {
                joining: "s-1".to_string()
            }
        );
        assert_eq!(
            leaving,
            WireEvent::LeavingUser {
                leaving: "s-1".to_string()
            }
        );
    }

    #[test]
    fn test_domain_video_frame_to_wire_event() {
        // テスト項目: VideoFrame の全フィールドが wire イベントへ引き継がれる
        // given (前提条件):
        let event = Event::VideoFrame {
            session_id: SessionId::new("s-9".to_string()).unwrap(),
            user: "bob".to_string(),
            frame: "data:image/jpeg;base64,BBBB".to_string(),
            rotation: 270,
        };

        // when (操作):
        let wire: WireEvent = event.into();

        // then (期待する結果):
        assert_eq!(
            wire,
            WireEvent::VideoFrame {
                session_id: "s-9".to_string(),
                user: "bob".to_string(),
                frame: "data:image/jpeg;base64,BBBB".to_string(),
                rotation: 270,
            }
        );
    }
}
