//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::engine::RoomRegistry;
use crate::infrastructure::broker::RabbitBroker;

use super::{
    handler::{
        http::{add_member, create_room, get_room_messages, get_user_rooms, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Build the axum router for the chat backend.
///
/// Exposed separately from `Server` so integration tests can drive the
/// gateway in-process against injected collaborators.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws/rooms/{room_id}", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_user_rooms).post(create_room))
        .route("/api/rooms/{room_id}/members", post(add_member))
        .route("/api/rooms/{room_id}/messages", get(get_room_messages))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Room chat server
///
/// Owns the HTTP/WebSocket surface plus the lifecycle of the broker
/// consumer and the active room engines.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(state, registry, broker);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    registry: Arc<RoomRegistry>,
    broker: Arc<RabbitBroker>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(state: Arc<AppState>, registry: Arc<RoomRegistry>, broker: Arc<RabbitBroker>) -> Self {
        Self {
            state,
            registry,
            broker,
        }
    }

    /// Run the chat server
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
        let app = build_router(Arc::clone(&self.state));

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("room chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws/rooms/{{room_id}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        // 接続の受付が止まってから、ブローカー → エンジンの順に畳む
        self.broker.stop().await;
        self.registry.shutdown().await;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
