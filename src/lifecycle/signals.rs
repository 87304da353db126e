//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for SIGINT, SIGTERM and SIGSEGV
//! - Translate the first one received into a stop trigger
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - A signal that cannot be registered is logged and skipped; Tokio
//!   refuses SIGSEGV, for one
//! - Outside Unix only Ctrl-C is available

use crate::lifecycle::shutdown::{Signal, StopTrigger};

/// Registered OS signal listeners.
pub struct OsSignals {
    #[cfg(unix)]
    streams: Vec<(tokio::signal::unix::Signal, Signal)>,
}

#[cfg(unix)]
const SIGSEGV: i32 = 11;

/// Register the stop signals. Must be called inside a Tokio runtime.
#[cfg(unix)]
pub fn listen() -> OsSignals {
    use tokio::signal::unix::{signal, SignalKind};

    let wanted = [
        (SignalKind::interrupt(), Signal::Interrupt),
        (SignalKind::terminate(), Signal::Terminate),
        (SignalKind::from_raw(SIGSEGV), Signal::SegmentationFault),
    ];

    let mut streams = Vec::with_capacity(wanted.len());
    for (kind, sig) in wanted {
        match signal(kind) {
            Ok(stream) => streams.push((stream, sig)),
            Err(err) => tracing::warn!(signal = %sig, error = %err, "Cannot listen for signal"),
        }
    }
    OsSignals { streams }
}

#[cfg(not(unix))]
pub fn listen() -> OsSignals {
    OsSignals {}
}

impl OsSignals {
    /// Signals that were registered successfully.
    #[cfg(unix)]
    pub fn registered(&self) -> Vec<Signal> {
        self.streams.iter().map(|(_, sig)| *sig).collect()
    }

    /// Wait for the next registered signal.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> Signal {
        use futures_util::future::{select_all, FutureExt};

        if self.streams.is_empty() {
            return std::future::pending().await;
        }
        let waits = self
            .streams
            .iter_mut()
            .map(|(stream, sig)| {
                let sig = *sig;
                async move {
                    stream.recv().await;
                    sig
                }
                .boxed()
            });
        let (sig, _, _) = select_all(waits).await;
        sig
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) -> Signal {
        match tokio::signal::ctrl_c().await {
            Ok(()) => Signal::Interrupt,
            Err(err) => {
                tracing::warn!(error = %err, "Cannot listen for Ctrl-C");
                std::future::pending().await
            }
        }
    }

    /// Trigger a stop with the first signal received.
    pub async fn forward(mut self, trigger: StopTrigger) {
        let sig = self.recv().await;
        tracing::info!(signal = %sig, "Signal received");
        trigger.trigger(sig);
    }
}
