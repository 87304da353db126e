//! Stop coordination for the process.

use std::fmt;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Termination triggers that share the stop path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Interrupt,
    Terminate,
    SegmentationFault,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signal::Interrupt => "interrupt",
            Signal::Terminate => "terminated",
            Signal::SegmentationFault => "segmentation fault",
        })
    }
}

/// Create a stop rendezvous: any number of triggers, one listener.
pub fn stop_channel() -> (StopTrigger, StopListener) {
    let (tx, rx) = oneshot::channel();
    (
        StopTrigger {
            slot: Arc::new(Mutex::new(Some(tx))),
        },
        StopListener { rx },
    )
}

/// Producer side of the stop rendezvous. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StopTrigger {
    slot: Arc<Mutex<Option<oneshot::Sender<Signal>>>>,
}

impl StopTrigger {
    /// Deliver `signal` if nothing has been delivered yet.
    ///
    /// Returns `true` for the first call only.
    pub fn trigger(&self, signal: Signal) -> bool {
        let sender = match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match sender {
            Some(tx) => {
                tracing::info!(signal = %signal, "Stop requested");
                // The listener may already be gone; the first trigger still wins.
                let _ = tx.send(signal);
                true
            }
            None => {
                tracing::debug!(signal = %signal, "Duplicate stop ignored");
                false
            }
        }
    }

    pub fn is_triggered(&self) -> bool {
        match self.slot.lock() {
            Ok(slot) => slot.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }
}

/// Consumer side of the stop rendezvous.
#[derive(Debug)]
pub struct StopListener {
    rx: oneshot::Receiver<Signal>,
}

impl StopListener {
    /// Block until the first trigger fires.
    ///
    /// If every trigger is dropped without firing this never returns.
    pub async fn wait(self) -> Signal {
        match self.rx.await {
            Ok(signal) => signal,
            Err(_) => std::future::pending().await,
        }
    }
}

/// Wait for the serve task and turn any way it ends badly into a
/// `Terminate` stop: a returned error or a panic.
///
/// A clean return triggers nothing. Returns whether this call delivered the
/// stop.
pub async fn stop_on_failure<E>(task: JoinHandle<Result<(), E>>, trigger: StopTrigger) -> bool
where
    E: fmt::Display,
{
    match task.await {
        Ok(Ok(())) => false,
        Ok(Err(err)) => {
            println!("serve error: {err:#}");
            trigger.trigger(Signal::Terminate)
        }
        Err(err) => {
            tracing::error!(error = %err, "Serve task did not complete");
            println!("serve error: {err}");
            trigger.trigger(Signal::Terminate)
        }
    }
}
