//! Annotated errors and a named-route echo server.
//!
//! # Architecture Overview
//!
//! ```text
//!   failure chain                           dispatch server
//!   ─────────────                           ───────────────
//!   dao()    wrap!(NO_ROWS, ..)             options → ServerConfig
//!     │                                       │
//!   logic()  with_message!(..)              load_routes  (TaskGroup fan-out/join)
//!     │                                       │
//!   main     cause_is / is → {:#}           listen → axum::serve
//!                                             │
//!                                           StopTrigger ◀── OS signals / serve error
//! ```

// Failure annotation
pub mod failure;

// Server
pub mod config;
pub mod http;
pub mod routing;
pub mod task;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::{with_addr, with_service, ServerConfig};
pub use failure::{Failure, Sentinel};
pub use http::{EchoService, Server, ServerState};
pub use lifecycle::{stop_channel, Signal};
