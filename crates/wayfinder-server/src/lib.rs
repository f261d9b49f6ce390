//! HTTP server exposing campus routing

pub mod router;
pub mod handlers;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::info;
use wayfinder_data::CampusMap;

/// Where the server listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4567,
        }
    }
}

/// State shared by every request handler.
///
/// The map is behind a lock because the graph engine itself does no
/// synchronization.
pub struct ServerState {
    pub campus: RwLock<CampusMap>,
}

impl ServerState {
    pub fn new(campus: CampusMap) -> Self {
        Self {
            campus: RwLock::new(campus),
        }
    }
}

/// The Wayfinder HTTP server.
pub struct WayfinderServer {
    config: ServerConfig,
    state: Arc<ServerState>,
}

impl WayfinderServer {
    pub fn new(campus: CampusMap, config: ServerConfig) -> Self {
        Self {
            config,
            state: Arc::new(ServerState::new(campus)),
        }
    }

    /// Handle to the shared state.
    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        info!("Wayfinder server listening on {}", listener.local_addr()?);

        let app = router::create_router(self.state);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
