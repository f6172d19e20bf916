//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::{MessageStore, SessionRegistry};
use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, LoadMessagesUseCase, SendMessageUseCase,
    SendSnapshotUseCase,
};

use super::{
    handler::{
        http::{debug_state, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket broadcast server
///
/// This struct encapsulates the wired-up usecases and provides a method to
/// run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_session_usecase,
///     disconnect_session_usecase,
///     send_message_usecase,
///     load_messages_usecase,
///     send_snapshot_usecase,
///     store,
///     registry,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    connect_session: Arc<ConnectSessionUseCase>,
    disconnect_session: Arc<DisconnectSessionUseCase>,
    send_message: Arc<SendMessageUseCase>,
    load_messages: Arc<LoadMessagesUseCase>,
    send_snapshot: Arc<SendSnapshotUseCase>,
    store: Arc<MessageStore>,
    registry: Arc<SessionRegistry>,
}

impl Server {
    /// Create a new Server instance from its wired-up dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_session: Arc<ConnectSessionUseCase>,
        disconnect_session: Arc<DisconnectSessionUseCase>,
        send_message: Arc<SendMessageUseCase>,
        load_messages: Arc<LoadMessagesUseCase>,
        send_snapshot: Arc<SendSnapshotUseCase>,
        store: Arc<MessageStore>,
        registry: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            connect_session,
            disconnect_session,
            send_message,
            load_messages,
            send_snapshot,
            store,
            registry,
        }
    }

    /// Run the WebSocket broadcast server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            connect_session: self.connect_session,
            disconnect_session: self.disconnect_session,
            send_message: self.send_message,
            load_messages: self.load_messages,
            send_snapshot: self.send_snapshot,
            store: self.store,
            registry: self.registry,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/socket", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/debug/state", get(debug_state))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "broadcast chat server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/socket", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
