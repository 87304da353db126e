//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! ServerConfig
//!     → server.rs (state machine: Unbound → Binding → Serving → Stopped)
//!     → registration.rs (one task per route, joined; mount on the router)
//!     → axum::serve on the bound listener
//!     → per request: route path → service.rs (Service::call) → response
//! ```

pub mod echo;
pub mod registration;
pub mod server;
pub mod service;

pub use echo::EchoService;
pub use registration::{Binding, RegistrationError};
pub use server::{Server, ServerState};
pub use service::{Service, SharedService};
