//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Stop (shutdown.rs):
//!     serve error / panic ──┐
//!                           ├─→ StopTrigger (first writer wins) → StopListener::wait → exit
//!     OS signal ────────────┘
//!
//! Signals (signals.rs):
//!     SIGINT / SIGTERM / SIGSEGV → StopTrigger
//! ```
//!
//! # Design Decisions
//! - One stop path for every trigger
//! - No drain: the process exits as soon as the listener unblocks
//! - Extra triggers after the first are ignored, never an error

pub mod shutdown;
pub mod signals;

pub use shutdown::{stop_channel, stop_on_failure, Signal, StopListener, StopTrigger};
