//! Session lifecycle status.

use serde::{Deserialize, Serialize};

/// Where the session is in its startup lifecycle.
///
/// Set to `Initializing` once at startup, then moves to `Ready` or
/// `Failed`; it never cycles back to `Initializing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// No bootstrap attempt has been made yet.
    Idle,
    /// The startup renewal call is in flight.
    Initializing,
    /// A session was established.
    Ready,
    /// The startup renewal call failed; the client is unauthenticated.
    Failed,
}
