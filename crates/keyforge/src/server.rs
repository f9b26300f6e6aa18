//! `KeyforgeServer` builder, router, and serve loop.
//!
//! This is the entry point for running the service. It ties together
//! all the layers: keys → registry → issuer → HTTP.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use keyforge_keys::KeyPair;
use keyforge_registry::InMemorySessionStore;
use keyforge_token::TokenIssuer;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::KeyforgeError;
use crate::handler;

/// Shared state handed to every request handler.
///
/// Cloning is an `Arc` bump. The issuer needs no outer lock: the key pair
/// is read-only and the session store locks internally.
#[derive(Clone)]
pub struct AppState {
    issuer: Arc<TokenIssuer<InMemorySessionStore>>,
}

impl AppState {
    /// Fresh state with an empty registry.
    pub fn new(keys: Arc<KeyPair>) -> Self {
        Self::with_issuer(Arc::new(TokenIssuer::new(
            keys,
            Arc::new(InMemorySessionStore::new()),
        )))
    }

    /// State around an existing issuer.
    pub fn with_issuer(issuer: Arc<TokenIssuer<InMemorySessionStore>>) -> Self {
        Self { issuer }
    }

    pub fn issuer(&self) -> &TokenIssuer<InMemorySessionStore> {
        &self.issuer
    }
}

/// Builds the HTTP router over `state`.
///
/// | Route | Handler |
/// |-------|---------|
/// | `GET /api/public-key` | published PEM text |
/// | `POST /api/create-session` | new session id |
/// | `POST /api/issue-token` | signed token |
/// | `GET /healthz` | liveness |
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/public-key", get(handler::public_key))
        .route("/api/create-session", post(handler::create_session))
        .route("/api/issue-token", post(handler::issue_token))
        .route("/healthz", get(handler::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builder for configuring and starting a Keyforge server.
///
/// # Example
///
/// ```rust,ignore
/// let server = KeyforgeServer::builder()
///     .bind("0.0.0.0:8080")
///     .build(keys)
///     .await?;
/// server.run().await
/// ```
pub struct KeyforgeServerBuilder {
    bind_addr: String,
}

impl KeyforgeServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Binds the listener and builds shared state around `keys`.
    ///
    /// Keys are loaded before this is called, so a bad key file never
    /// results in an open port.
    pub async fn build(self, keys: KeyPair) -> Result<KeyforgeServer, KeyforgeError> {
        let listener = TcpListener::bind(&self.bind_addr).await?;
        let state = AppState::new(Arc::new(keys));

        Ok(KeyforgeServer { listener, state })
    }
}

impl Default for KeyforgeServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Keyforge server.
///
/// Call [`run()`](Self::run) to start serving requests.
pub struct KeyforgeServer {
    listener: TcpListener,
    state: AppState,
}

impl KeyforgeServer {
    /// Creates a new builder.
    pub fn builder() -> KeyforgeServerBuilder {
        KeyforgeServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The state every handler sees.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serves requests until Ctrl-C, then drains in-flight requests.
    pub async fn run(self) -> Result<(), KeyforgeError> {
        self.run_until(shutdown_signal()).await
    }

    /// Serves requests until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), KeyforgeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        tracing::info!(%addr, "Keyforge server running");

        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Keyforge server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        // Without a handler, run until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
