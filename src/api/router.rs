//! Content server router configuration.

use std::path::PathBuf;

use axum::{routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::handlers::{health, serve_document, AppState};

/// Create the router for the content server.
///
/// - `GET /health` - health check
/// - `GET /file/{name}/{user_id}` - document with the caller id substituted
/// - `GET /uploads/*` - raw files from the content store directory
/// - everything else - raw files from the public directory
pub fn create_router(state: AppState, public_dir: impl Into<PathBuf>) -> Router {
    let uploads = ServeDir::new(state.content.root());

    Router::new()
        .route("/health", get(health))
        .route("/file/{name}/{user_id}", get(serve_document))
        .nest_service("/uploads", uploads)
        .fallback_service(ServeDir::new(public_dir.into()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory served for paths outside the API.
    pub public_dir: PathBuf,
    /// Stop accepting connections on Ctrl-C and drain in-flight requests.
    pub graceful_shutdown: bool,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = dir.into();
        self
    }

    pub fn without_graceful_shutdown(mut self) -> Self {
        self.graceful_shutdown = false;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_dir: PathBuf::from("public"),
            graceful_shutdown: true,
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received, stopping content server");
}

/// Start the content server.
pub async fn serve(config: ServerConfig, state: AppState) -> crate::Result<()> {
    let addr = config.bind_address();
    let router = create_router(state, config.public_dir.clone());

    tracing::info!("Starting content server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(crate::error::RelayError::Io)?;

    let server = axum::serve(listener, router);
    if config.graceful_shutdown {
        server.with_graceful_shutdown(shutdown_signal()).await?;
    } else {
        server.await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert!(config.graceful_shutdown);
    }

    #[test]
    fn test_server_config_custom() {
        let config = ServerConfig::new("127.0.0.1", 8080)
            .with_public_dir("/srv/public")
            .without_graceful_shutdown();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.public_dir, PathBuf::from("/srv/public"));
        assert!(!config.graceful_shutdown);
    }
}
