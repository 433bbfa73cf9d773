//! The operator-cancellable resume delay.
//!
//! When a run finds evidence of a previously interrupted migration it
//! waits a short window before continuing, giving the operator a chance to
//! stop the process (for instance when the partial ledger is actually
//! stale data that should be deleted). The wait is modelled as an explicit
//! primitive with a distinguished cancelled result rather than a bare
//! sleep, so the engine's control flow stays testable.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// How a resume delay ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The window elapsed; the migration continues.
    Elapsed,
    /// The operator cancelled; the engine stops without further mutation.
    Cancelled,
}

/// A cancellable delay consumed by the migration engine.
pub trait ResumeGate {
    /// Blocks for up to `window`, returning early on cancellation.
    fn wait(&self, window: Duration) -> WaitOutcome;
}

/// A gate cancelled by a host shutdown signal.
pub struct ShutdownGate {
    rx: Receiver<()>,
}

/// The host-side handle that cancels a [`ShutdownGate`].
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: Sender<()>,
}

impl ShutdownHandle {
    /// Signals the gate to cancel. Safe to call more than once.
    pub fn cancel(&self) {
        let _ = self.tx.send(());
    }
}

impl ShutdownGate {
    /// Creates a gate and the handle the host wires to its shutdown hook.
    #[must_use]
    pub fn new() -> (Self, ShutdownHandle) {
        let (tx, rx) = mpsc::channel();
        (Self { rx }, ShutdownHandle { tx })
    }
}

impl ResumeGate for ShutdownGate {
    fn wait(&self, window: Duration) -> WaitOutcome {
        match self.rx.recv_timeout(window) {
            Ok(()) => WaitOutcome::Cancelled,
            Err(RecvTimeoutError::Timeout) => WaitOutcome::Elapsed,
            Err(RecvTimeoutError::Disconnected) => {
                // No handle left to cancel; honour the full window.
                thread::sleep(window);
                WaitOutcome::Elapsed
            }
        }
    }
}

/// A gate that never waits. For tests and headless batch hosts.
pub struct NoWait;

impl ResumeGate for NoWait {
    fn wait(&self, _window: Duration) -> WaitOutcome {
        WaitOutcome::Elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_handle_wins_over_window() {
        let (gate, handle) = ShutdownGate::new();
        handle.cancel();
        assert_eq!(gate.wait(Duration::from_secs(5)), WaitOutcome::Cancelled);
    }

    #[test]
    fn window_elapses_without_signal() {
        let (gate, _handle) = ShutdownGate::new();
        assert_eq!(gate.wait(Duration::from_millis(5)), WaitOutcome::Elapsed);
    }

    #[test]
    fn no_wait_elapses_immediately() {
        assert_eq!(NoWait.wait(Duration::from_secs(60)), WaitOutcome::Elapsed);
    }
}
