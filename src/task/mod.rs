//! Task coordination.
//!
//! # Data Flow
//! ```text
//! TaskGroup::spawn × N   (each on the runtime, independent)
//!     → wait()           (collect results by spawn index)
//!     → Ok(results in spawn order) | Err(lowest-index failure)
//! ```
//!
//! # Design Decisions
//! - Failures short-circuit the wait once no lower-index task is pending
//! - Tasks still running at that point are detached, never aborted
//! - A panicked task is reported through the caller's error type

pub mod group;

pub use group::TaskGroup;
