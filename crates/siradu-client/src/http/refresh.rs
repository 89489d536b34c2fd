//! Single-flight coordination for session renewal.
//!
//! At most one renewal call is in flight at any instant. The first
//! request to observe an expired token becomes the leader and performs
//! the renewal; every request faulting while it runs parks on a waiter
//! and is released with the same outcome: the new token or the
//! renewal error. Waiters release in FIFO arrival order.

use std::sync::Mutex;

use tokio::sync::oneshot;
use tracing::debug;

use siradu_core::AuthError;

use crate::auth::AccessToken;

/// How a renewal cycle ended, fanned out to every parked request.
pub(crate) type RefreshOutcome = Result<AccessToken, AuthError>;

/// What a request observing a 401 must do next.
pub(crate) enum RefreshEntry {
    /// No renewal was in flight; the caller now owns one and must
    /// [`settle`](RefreshGate::settle) it.
    Leader,
    /// A renewal is already in flight; await the shared outcome.
    Waiter(oneshot::Receiver<RefreshOutcome>),
}

#[derive(Default)]
struct GateState {
    refreshing: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// The Idle/Refreshing state machine guarding renewal.
///
/// The decision in [`enter`](Self::enter) and the drain in
/// [`settle`](Self::settle) each complete synchronously under the lock,
/// so no suspension can interleave with a state transition.
pub(crate) struct RefreshGate {
    state: Mutex<GateState>,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState::default()),
        }
    }

    /// Join the current renewal cycle, or start one.
    pub fn enter(&self) -> RefreshEntry {
        let mut state = self.state.lock().unwrap();
        if state.refreshing {
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            debug!(queued = state.waiters.len(), "request parked behind refresh");
            RefreshEntry::Waiter(rx)
        } else {
            state.refreshing = true;
            RefreshEntry::Leader
        }
    }

    /// Finish the cycle: return to idle and release every waiter in
    /// arrival order with the shared outcome.
    ///
    /// The queue is swapped out under the lock before any send, so a
    /// released waiter that immediately faults again starts a fresh
    /// cycle instead of re-joining this one.
    pub fn settle(&self, outcome: &RefreshOutcome) {
        let waiters = {
            let mut state = self.state.lock().unwrap();
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };

        debug!(released = waiters.len(), ok = outcome.is_ok(), "refresh settled");
        for waiter in waiters {
            // A waiter whose request was dropped is gone; nothing to do.
            let _ = waiter.send(outcome.clone());
        }
    }
}
