//! Configuration file schema.
//!
//! ```toml
//! addr = ":8080"
//!
//! [[routes]]
//! name = "echo"
//! handler = "echo"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::options::{with_addr, with_shared_service, ServerOption, DEFAULT_ADDR};
use crate::http::service::SharedService;
use crate::http::EchoService;

/// Root of the configuration file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FileConfig {
    /// Bind address (e.g., ":8080" or "127.0.0.1:8080").
    pub addr: String,

    /// Named routes.
    pub routes: Vec<RouteEntry>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            routes: Vec::new(),
        }
    }
}

/// One named route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteEntry {
    pub name: String,

    #[serde(default)]
    pub handler: HandlerKind,
}

/// Built-in handlers a route can use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    #[default]
    Echo,
}

impl HandlerKind {
    pub fn build(self) -> SharedService {
        match self {
            HandlerKind::Echo => std::sync::Arc::new(EchoService),
        }
    }
}

impl FileConfig {
    /// The option sequence this file describes: address first, then routes
    /// in file order.
    pub fn into_options(self) -> Vec<ServerOption> {
        let mut options = Vec::with_capacity(self.routes.len() + 1);
        options.push(with_addr(self.addr));
        for route in self.routes {
            options.push(with_shared_service(route.name, route.handler.build()));
        }
        options
    }
}
