//! Process-wide credential store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use siradu_core::{SessionStatus, UserIdentity};

use super::tokens::AccessToken;

/// Single source of truth for the access token and current user.
///
/// Cheap to clone (internal `Arc`); no network or persistence logic.
/// Reads are synchronous, and every mutation completes under one write
/// lock, so a reader observes either the old state or the new one,
/// never a half-applied transition.
#[derive(Clone)]
pub struct CredentialStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: RwLock<SessionState>,
    // Bootstrap runs at most once per process, even under duplicate
    // initialization triggers.
    bootstrap_started: AtomicBool,
}

struct SessionState {
    access_token: Option<AccessToken>,
    user: Option<UserIdentity>,
    status: SessionStatus,
}

impl CredentialStore {
    /// Create an empty, unauthenticated store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(SessionState {
                    access_token: None,
                    user: None,
                    status: SessionStatus::Idle,
                }),
                bootstrap_started: AtomicBool::new(false),
            }),
        }
    }

    /// The current access token, if authenticated.
    pub fn access_token(&self) -> Option<AccessToken> {
        let state = self.inner.state.read().unwrap();
        state.access_token.clone()
    }

    /// Replace the access token; does not touch the user.
    pub fn set_access_token(&self, token: AccessToken) {
        let mut state = self.inner.state.write().unwrap();
        state.access_token = Some(token);
    }

    /// The current user identity, if authenticated.
    pub fn user(&self) -> Option<UserIdentity> {
        let state = self.inner.state.read().unwrap();
        state.user.clone()
    }

    /// Replace the user identity; does not touch the token.
    pub fn set_user(&self, user: UserIdentity) {
        let mut state = self.inner.state.write().unwrap();
        state.user = Some(user);
    }

    /// The current session lifecycle status.
    pub fn status(&self) -> SessionStatus {
        let state = self.inner.state.read().unwrap();
        state.status
    }

    pub(crate) fn set_status(&self, status: SessionStatus) {
        let mut state = self.inner.state.write().unwrap();
        state.status = status;
    }

    /// Clear both token and user in one state transition.
    pub fn logout(&self) {
        let mut state = self.inner.state.write().unwrap();
        state.access_token = None;
        state.user = None;
    }

    /// Claim the one-shot bootstrap slot.
    ///
    /// Returns `true` exactly once per process; later callers get
    /// `false` and must not start another bootstrap.
    pub(crate) fn try_begin_bootstrap(&self) -> bool {
        self.inner
            .bootstrap_started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read().unwrap();
        f.debug_struct("CredentialStore")
            .field("user", &state.user.as_ref().map(|u| u.email.as_str()))
            .field("access_token", &"[REDACTED]")
            .field("status", &state.status)
            .finish()
    }
}
