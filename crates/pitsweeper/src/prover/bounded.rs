//! Time-bounded refutation on a worker thread.
//!
//! The worker owns the `Refutation` (and with it the private clause copy), so
//! abandoning it on timeout cannot leave the caller's knowledge base in a
//! partial state. On expiry the caller raises the cancel flag and returns
//! without joining; the worker notices the flag (or its own deadline) at the
//! next resolution round and exits, and its result is dropped.

use super::{ProofResult, Refutation};
use std::sync::atomic::Ordering;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Run `refutation` with a wall-clock `budget`.
///
/// Returns `None` when the budget expires, the worker cannot be spawned, or
/// the worker dies; the caller treats all three as "unknown".
pub fn prove_with_budget(mut refutation: Refutation, budget: Duration) -> Option<ProofResult> {
    let cancel = refutation.cancel_handle();
    let (tx, rx) = mpsc::channel();

    let spawned = thread::Builder::new()
        .name("refutation".into())
        .spawn(move || {
            let result = refutation.prove();
            // The receiver is gone if the caller already timed out
            let _ = tx.send(result);
        });

    if let Err(e) = spawned {
        warn!(error = %e, "failed to spawn refutation worker");
        return None;
    }

    match rx.recv_timeout(budget) {
        Ok(result) => Some(result),
        Err(RecvTimeoutError::Timeout) => {
            cancel.store(true, Ordering::Relaxed);
            debug!(budget_ms = budget.as_millis() as u64, "refutation timed out");
            None
        }
        Err(RecvTimeoutError::Disconnected) => {
            warn!("refutation worker exited without a result");
            None
        }
    }
}
