//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! with_addr / with_service closures          config file (TOML)
//!     │                                          → loader.rs (read & deserialize)
//!     │                                          → validation.rs (semantic checks)
//!     │                                          → schema.rs (into option closures)
//!     ▼                                          │
//! options.rs: applied in order to a draft ◀──────┘
//!     → ServerConfig (immutable, route table behind Arc)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the server is built
//! - Options apply in the order given; later ones win
//! - Validation returns every problem, not just the first

pub mod loader;
pub mod options;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use options::{
    resolve_bind_address, with_addr, with_service, ServerConfig, ServerOption, ServerOptions,
    DEFAULT_ADDR,
};
pub use schema::{FileConfig, HandlerKind, RouteEntry};
