//! HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use restyle_config::Config;

use crate::error::ApiError;
use crate::http::routes::create_router;
use crate::state::AppState;

pub struct ApiServer {
    host: String,
    port: u16,
    state: Arc<AppState>,
}

impl ApiServer {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Ok(Self {
            host: config.server.host.clone(),
            port: config.server.port,
            state: Arc::new(AppState::new(&config.fetcher, &config.proxy)?),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(&self, shutdown: F) -> Result<(), ApiError>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self
            .addr()
            .parse()
            .map_err(|_| ApiError::InvalidAddress(self.addr()))?;
        let listener = TcpListener::bind(addr).await?;

        info!("Restyle API listening on http://{}", addr);
        axum::serve(listener, create_router(self.state.clone()))
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Restyle API stopped");
        Ok(())
    }
}
