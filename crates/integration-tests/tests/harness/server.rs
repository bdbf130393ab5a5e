//! Test server wrapper that starts the error-translating server on a random port

use std::net::SocketAddr;

use axum::Router;
use errorizer_config::Config;
use errorizer_core::Definitions;
use errorizer_server::Server;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start the demo app from [`super::app`] with the given configuration
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        Self::start_with(config, super::app::router(), super::app::definitions()).await
    }

    /// Start a test server around arbitrary routes and definitions
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start_with(config: Config, routes: Router, definitions: Definitions) -> anyhow::Result<Self> {
        let server = Server::new(&config, routes, definitions)?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// GET `path` and return the status and parsed JSON body
    pub async fn get_json(&self, path: &str) -> anyhow::Result<(u16, serde_json::Value)> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status().as_u16();
        Ok((status, resp.json().await?))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
