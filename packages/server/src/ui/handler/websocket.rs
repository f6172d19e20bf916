//! WebSocket connection handlers.
//!
//! One logical session per accepted connection: an inbound task decodes and
//! dispatches commands, an outbound task merges direct replies with the
//! session's broadcast subscription and writes them to the socket. Demand is
//! driven from the outbound task: one event is requested up front and one
//! more after each completed write, so the subscription never delivers
//! faster than the transport accepts.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{Event, SessionId, Subscription},
    infrastructure::dto::{WireCommand, WireEvent, decode, encode},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // The session id is assigned here, at connection-accept time, and is
    // unique for the connection's lifetime.
    let session_id = SessionId::generate();
    tracing::info!(session_id = %session_id, "accepting websocket connection");
    ws.on_upgrade(move |socket| handle_socket(socket, state, session_id))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, session_id: SessionId) {
    let (sender, receiver) = socket.split();

    // Entering Active: subscription registered, session id registered,
    // JoiningUser published.
    let (subscription, events_rx) = state.connect_session.execute(session_id.clone());

    // Direct replies (LoadMessages, decode diagnostics) bypass the hub.
    let (reply_tx, reply_rx) = mpsc::unbounded_channel::<String>();

    let mut recv_task = tokio::spawn(inbound_loop(
        receiver,
        state.clone(),
        session_id.clone(),
        reply_tx,
    ));
    let mut send_task = tokio::spawn(outbound_loop(
        sender,
        reply_rx,
        events_rx,
        subscription.clone(),
    ));

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Every termination trigger funnels through here; the usecase guarantees
    // the LeavingUser publication and registry removal happen exactly once.
    state.disconnect_session.execute(&session_id, &subscription);
}

/// Read inbound frames, decode and dispatch commands.
///
/// A transport error is treated like a graceful close: the loop ends and the
/// shared cleanup path runs. A decode failure is surfaced to this connection
/// only and does not tear it down.
async fn inbound_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    session_id: SessionId,
    reply_tx: mpsc::UnboundedSender<String>,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!(session_id = %session_id, "websocket transport error: {}", e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                dispatch_command(&state, &session_id, text.as_str(), &reply_tx);
            }
            Message::Ping(_) => {
                tracing::debug!("received ping");
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!(session_id = %session_id, "client requested close");
                break;
            }
            _ => {}
        }
    }
}

fn dispatch_command(
    state: &AppState,
    session_id: &SessionId,
    text: &str,
    reply_tx: &mpsc::UnboundedSender<String>,
) {
    let command = match decode(text) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!(session_id = %session_id, "failed to decode inbound payload: {}", e);
            send_diagnostic(reply_tx, &e.to_string());
            return;
        }
    };

    match command {
        WireCommand::AddMessage { message, user } => {
            state.send_message.execute(user, message);
        }
        WireCommand::LoadMessages => {
            for event in state.load_messages.execute() {
                send_reply(reply_tx, event);
            }
        }
        WireCommand::SendSnapshot {
            session_id: origin,
            user,
            frame,
            rotation,
        } => match SessionId::new(origin) {
            Ok(origin) => state.send_snapshot.execute(origin, user, frame, rotation),
            Err(e) => {
                tracing::warn!(session_id = %session_id, "rejected snapshot: {}", e);
                send_diagnostic(reply_tx, &e.to_string());
            }
        },
    }
}

fn send_reply(reply_tx: &mpsc::UnboundedSender<String>, event: Event) {
    match encode(&WireEvent::from(event)) {
        // A closed reply channel means the connection is already going away.
        Ok(text) => {
            let _ = reply_tx.send(text);
        }
        Err(e) => tracing::error!("failed to encode reply event: {}", e),
    }
}

/// Best-effort diagnostic frame for the offending connection only
fn send_diagnostic(reply_tx: &mpsc::UnboundedSender<String>, reason: &str) {
    let diagnostic = serde_json::json!({"type": "Error", "reason": reason}).to_string();
    let _ = reply_tx.send(diagnostic);
}

/// Merge direct replies and subscription events into the outbound stream.
///
/// No global order is imposed between the two sources; each is FIFO on its
/// own. `request(1)` is issued only as the write side proves ready, which is
/// what bounds how far the hub may run ahead of this connection.
async fn outbound_loop(
    mut sender: SplitSink<WebSocket, Message>,
    mut reply_rx: mpsc::UnboundedReceiver<String>,
    mut events_rx: mpsc::UnboundedReceiver<Event>,
    subscription: Arc<Subscription>,
) {
    subscription.request(1);
    loop {
        tokio::select! {
            maybe_reply = reply_rx.recv() => {
                let Some(text) = maybe_reply else {
                    break;
                };
                if sender.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            maybe_event = events_rx.recv() => {
                // A closed event channel means the subscription was cancelled
                let Some(event) = maybe_event else {
                    break;
                };
                match encode(&WireEvent::from(event)) {
                    Ok(text) => {
                        if sender.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::error!("failed to encode broadcast event: {}", e),
                }
                subscription.request(1);
            }
        }
    }
}
