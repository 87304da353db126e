//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! ServerOptions (with_service × N)
//!     → table.rs (name → service, unique names)
//!     → frozen into Arc<RouteTable> when the server is built
//!     → each name validated into a path (/<name>) during the bind phase
//! ```
//!
//! # Design Decisions
//! - Table is immutable once the server exists (shared via Arc, no locks)
//! - Re-inserting a name replaces the earlier service
//! - Iteration is sorted by name; order carries no meaning

pub mod table;

pub use table::{route_path, RouteNameError, RouteTable};
