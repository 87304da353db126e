//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Build the frozen configuration from option closures
//! - Run the bind phase and mount the routes
//! - Bind the listener and serve until told to stop
//! - Publish the server state for observers
//!
//! # State Machine
//! ```text
//! Unbound → Binding → Serving { addr } → Stopped
//!              │                           ▲
//!              └── registration failure ───┘
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::{resolve_bind_address, ServerConfig, ServerOption, ServerOptions};
use crate::failure::Failure;
use crate::http::registration::{mount, register_all};
use crate::routing::RouteTable;
use crate::wrap_err;

/// Where the server is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Configured, nothing attached yet.
    Unbound,
    /// Routes are being registered.
    Binding,
    /// Listener bound and accepting.
    Serving { addr: SocketAddr },
    /// Terminal.
    Stopped,
}

/// HTTP server dispatching named routes to their services.
pub struct Server {
    config: ServerConfig,
    state: watch::Sender<ServerState>,
}

impl Server {
    /// Apply `options` in order and build the server.
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ServerOption>,
    {
        Self::from_config(ServerOptions::apply(options))
    }

    pub fn from_config(config: ServerConfig) -> Self {
        let (state, _) = watch::channel(ServerState::Unbound);
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn routes(&self) -> Arc<RouteTable> {
        self.config.routes().clone()
    }

    /// Observe state transitions.
    pub fn state(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    /// Register every route concurrently and mount them on a router.
    ///
    /// A failed registration is returned with "load configuration" context
    /// and leaves the server `Stopped`.
    pub async fn load_routes(&self) -> Result<Router, Failure> {
        self.state.send_replace(ServerState::Binding);
        tracing::info!(routes = self.config.routes().len(), "Loading routes");

        match register_all(self.config.routes()).await {
            Ok(bindings) => Ok(Self::build_router(mount(bindings))),
            Err(err) => {
                self.state.send_replace(ServerState::Stopped);
                Err(wrap_err!(err, "load configuration"))
            }
        }
    }

    fn build_router(routes: Router) -> Router {
        routes.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    /// Serve until the process exits.
    pub async fn serve(self) -> Result<(), Failure> {
        self.serve_until(std::future::pending()).await
    }

    /// Serve until `stop` resolves.
    pub async fn serve_until<F>(self, stop: F) -> Result<(), Failure>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.load_routes().await?;
        let result = self.listen(router, stop).await;
        self.state.send_replace(ServerState::Stopped);
        tracing::info!("HTTP server stopped");
        result
    }

    async fn listen<F>(&self, router: Router, stop: F) -> Result<(), Failure>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let bind_address = resolve_bind_address(self.config.addr());
        let listener = TcpListener::bind(&bind_address)
            .await
            .map_err(|err| wrap_err!(err, "listen on {bind_address}"))?;
        let addr = listener
            .local_addr()
            .map_err(|err| wrap_err!(err, "listen on {bind_address}"))?;

        tracing::info!(address = %addr, "HTTP server starting");
        self.state.send_replace(ServerState::Serving { addr });

        axum::serve(listener, router)
            .with_graceful_shutdown(stop)
            .await
            .map_err(|err| wrap_err!(err, "serve"))
    }
}
