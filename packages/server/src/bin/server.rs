//! Real-time chat and snapshot broadcast server.
//!
//! Fans every chat message and webcam snapshot out to all connected clients,
//! and replays the bounded message history to late joiners.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chanoma-server
//! cargo run --bin chanoma-server -- --host 0.0.0.0 --port 3000
//! cargo run --bin chanoma-server -- --overflow-policy disconnect
//! ```

use std::sync::Arc;

use chanoma_server::{
    domain::{
        BroadcastHub, BufferPolicy, DEFAULT_HISTORY_CAPACITY, MessageStore, OverflowPolicy,
        SessionRegistry,
    },
    ui::Server,
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, LoadMessagesUseCase, SendMessageUseCase,
        SendSnapshotUseCase,
    },
};
use chanoma_shared::{logger::setup_logger, time::SystemClock};
use clap::{Parser, ValueEnum};

/// 購読バッファ超過時の方針（CLI 表現）
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OverflowPolicyArg {
    /// Drop the oldest buffered event
    DropOldest,
    /// Cancel the subscription (disconnects the client)
    Disconnect,
}

impl From<OverflowPolicyArg> for OverflowPolicy {
    fn from(arg: OverflowPolicyArg) -> Self {
        match arg {
            OverflowPolicyArg::DropOldest => OverflowPolicy::DropOldest,
            OverflowPolicyArg::Disconnect => OverflowPolicy::Disconnect,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "chanoma-server")]
#[command(about = "Real-time chat and snapshot broadcast server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Maximum number of chat messages kept in history
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,

    /// Maximum number of events buffered per subscription before the
    /// overflow policy applies
    #[arg(long, default_value_t = 1024)]
    max_buffered_events: usize,

    /// What to do when a subscription's buffer exceeds its bound
    #[arg(long, value_enum, default_value_t = OverflowPolicyArg::DropOldest)]
    overflow_policy: OverflowPolicyArg,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Domain state (store, registry, hub)
    // 2. UseCases
    // 3. Server
    let store = Arc::new(MessageStore::new(args.history_capacity));
    let registry = Arc::new(SessionRegistry::new());
    let hub = Arc::new(BroadcastHub::new(BufferPolicy {
        max_buffered: args.max_buffered_events,
        on_overflow: args.overflow_policy.into(),
    }));
    let clock = Arc::new(SystemClock);

    let connect_session = Arc::new(ConnectSessionUseCase::new(registry.clone(), hub.clone()));
    let disconnect_session = Arc::new(DisconnectSessionUseCase::new(registry.clone(), hub.clone()));
    let send_message = Arc::new(SendMessageUseCase::new(store.clone(), hub.clone(), clock));
    let load_messages = Arc::new(LoadMessagesUseCase::new(store.clone(), registry.clone()));
    let send_snapshot = Arc::new(SendSnapshotUseCase::new(hub.clone()));

    let server = Server::new(
        connect_session,
        disconnect_session,
        send_message,
        load_messages,
        send_snapshot,
        store,
        registry,
    );

    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}
