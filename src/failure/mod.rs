//! Failure annotation subsystem.
//!
//! # Data Flow
//! ```text
//! leaf operation fails
//!     → wrap!(SENTINEL, "context")      (root identity + first frame + backtrace)
//!     → with_message!(failure, "more")  (append frame, identity untouched)
//!     → ... any number of layers ...
//!     → caller: cause_is(SENTINEL) / is(SENTINEL)
//!     → render with {:#}
//! ```
//!
//! # Design Decisions
//! - Root identity is the address of a `'static` sentinel, never its text
//! - Annotating consumes the failure; the chain is extended in place
//! - Two comparisons: resolve-the-cause and walk-the-source-chain; both
//!   must agree at every depth

pub mod chain;
pub mod frame;
pub mod layers;
pub mod sentinel;

pub use chain::{is, Annotation, BoxError, Failure};
pub use frame::Frame;
pub use sentinel::{Sentinel, NO_ROWS};

/// Capture the call site of the macro as a [`Frame`].
#[macro_export]
macro_rules! here {
    () => {{
        fn __owner() {}
        $crate::failure::Frame::caller($crate::failure::frame::owner_of(
            ::std::any::type_name_of_val(&__owner),
        ))
    }};
}

/// Root a new [`Failure`] at a sentinel, recording the call site.
#[macro_export]
macro_rules! wrap {
    ($sentinel:expr, $($msg:tt)+) => {
        $crate::failure::Failure::wrap($sentinel, format!($($msg)+), $crate::here!())
    };
}

/// Wrap an arbitrary error into a [`Failure`], recording the call site.
#[macro_export]
macro_rules! wrap_err {
    ($err:expr, $($msg:tt)+) => {
        $crate::failure::Failure::from_error($err, format!($($msg)+), $crate::here!())
    };
}

/// Append a context message to an existing [`Failure`], recording the call site.
#[macro_export]
macro_rules! with_message {
    ($failure:expr, $($msg:tt)+) => {
        $crate::failure::Failure::with_message($failure, format!($($msg)+), $crate::here!())
    };
}
