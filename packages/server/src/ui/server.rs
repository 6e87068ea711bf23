//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        get_meeting_detail, get_user_history, get_user_stats, health_check, join_meeting,
        schedule_meeting, start_meeting, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Meeting server
///
/// # Example
///
/// ```ignore
/// let server = huddle_server::app::build_server(RoomSettings::default());
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Router with every endpoint, without binding a socket
    pub fn into_router(self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/meetings", post(start_meeting))
            .route("/api/meetings/schedule", post(schedule_meeting))
            .route("/api/meetings/join", post(join_meeting))
            .route("/api/meetings/{meeting_id}", get(get_meeting_detail))
            .route("/api/users/{user_id}/history", get(get_user_history))
            .route("/api/users/{user_id}/stats", get(get_user_stats))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state)
    }

    /// Run the meeting server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let local_addr = listener.local_addr()?;
        let app = self.into_router();

        tracing::info!("Meeting server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
