mod errors;
mod health;
mod raised;

use std::net::SocketAddr;

use axum::Router;
use errorizer_config::Config;
use errorizer_core::{Definitions, ErrorMiddleware};
use tower_http::trace::TraceLayer;

pub use errors::{error_middleware, with_error_translation};
pub use raised::Raised;

/// Assembled server with application routes, error translation and tracing
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server around the application's routes
    ///
    /// Static definitions from the config's `[errors]` table are merged with
    /// `definitions`; entries registered in code win over the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the merged error definitions fail validation
    pub fn new(config: &Config, routes: Router, definitions: Definitions) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let mut merged = config.definitions()?;
        merged.extend(definitions);

        let middleware = ErrorMiddleware::new(Some(merged))?;

        let mut app = routes;

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Error translation (innermost, sees handler responses first)
        app = with_error_translation(app, middleware);

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Override the configured listen address
    #[must_use]
    pub fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
