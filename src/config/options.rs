//! Option closures applied to a draft configuration.

use std::sync::Arc;

use crate::http::service::{Service, SharedService};
use crate::routing::RouteTable;

/// Address used when no option sets one. `:PORT` means all interfaces.
pub const DEFAULT_ADDR: &str = ":8080";

/// A step that edits the draft configuration.
pub type ServerOption = Box<dyn FnOnce(&mut ServerOptions) + Send>;

/// Draft configuration, mutable only while options are applied.
#[derive(Debug)]
pub struct ServerOptions {
    pub addr: String,
    pub routes: RouteTable,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            routes: RouteTable::new(),
        }
    }
}

impl ServerOptions {
    /// Apply `options` in order to a fresh draft and freeze the result.
    pub fn apply<I>(options: I) -> ServerConfig
    where
        I: IntoIterator<Item = ServerOption>,
    {
        let mut draft = ServerOptions::default();
        for option in options {
            option(&mut draft);
        }
        draft.freeze()
    }

    pub fn freeze(self) -> ServerConfig {
        ServerConfig {
            addr: self.addr,
            routes: Arc::new(self.routes),
        }
    }
}

/// Set the bind address.
pub fn with_addr(addr: impl Into<String>) -> ServerOption {
    let addr = addr.into();
    Box::new(move |draft: &mut ServerOptions| draft.addr = addr)
}

/// Register `service` under `name`.
pub fn with_service<S: Service>(name: impl Into<String>, service: S) -> ServerOption {
    with_shared_service(name, Arc::new(service))
}

pub fn with_shared_service(name: impl Into<String>, service: SharedService) -> ServerOption {
    let name = name.into();
    Box::new(move |draft: &mut ServerOptions| {
        if draft.routes.insert(name.clone(), service).is_some() {
            tracing::warn!(route = %name, "route registered twice, keeping the last one");
        }
    })
}

/// Frozen server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    addr: String,
    routes: Arc<RouteTable>,
}

impl ServerConfig {
    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn routes(&self) -> &Arc<RouteTable> {
        &self.routes
    }
}

/// Expand `:PORT` to `0.0.0.0:PORT`; anything else is passed through.
pub fn resolve_bind_address(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}
