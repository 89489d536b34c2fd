//! Session operations: login, logout, and the startup bootstrap.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use siradu_core::{Result, SessionStatus, UserIdentity};

use crate::http::{ApiClient, CallOpts, RequestSpec};

use super::credentials::Credentials;
use super::tokens::AccessToken;

pub(crate) const LOGIN: &str = "/dashboard/login";
pub(crate) const REFRESH_SESSION: &str = "/auth/refresh";
pub(crate) const LOGOUT: &str = "/auth/logout";

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Response from login. The payload rides in a `data` envelope.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    data: LoginPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload {
    access_token: String,
    user: UserIdentity,
}

/// Response from the renewal endpoint.
///
/// Unlike login this is not enveloped; `user` accompanies the token on
/// the startup call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshSessionResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<UserIdentity>,
}

impl ApiClient {
    /// Authenticate with the dashboard and populate the store.
    ///
    /// The response also sets the ambient refresh cookie that later
    /// renewal calls rely on.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the backend
    /// is unreachable.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<UserIdentity> {
        info!("signing in");

        let request = LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
        };
        let response: LoginResponse = self
            .post(LOGIN, &request, CallOpts::success_toast())
            .await?;

        let LoginPayload { access_token, user } = response.data;
        self.store().set_access_token(AccessToken::new(access_token));
        self.store().set_user(user.clone());

        debug!("signed in");
        Ok(user)
    }

    /// End the session.
    ///
    /// The server-side call is best effort: whatever it returns, the
    /// local token and user are cleared.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let spec = RequestSpec::post(LOGOUT).opts(CallOpts::success_toast());
        if let Err(err) = self.request(spec).await {
            debug!(error = %err, "server-side logout failed");
        }
        self.store().logout();
        info!("signed out");
    }

    /// Establish a session at startup from the ambient refresh cookie.
    ///
    /// Runs the renewal once per process lifetime, however many times
    /// it is called: later calls (a re-mount, a duplicate init trigger)
    /// return the already-reached status without touching the network.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) -> SessionStatus {
        if !self.store().try_begin_bootstrap() {
            return self.store().status();
        }
        self.store().set_status(SessionStatus::Initializing);
        info!("bootstrapping session");

        // Straight to the renewal endpoint, never through the
        // dispatcher: a rejected startup cookie is one failed call,
        // not a 401 that would spiral into a second renewal.
        match self.renew_session().await {
            Ok(renewed) => {
                if let Some(user) = renewed.user {
                    self.store().set_user(user);
                }
                self.store().set_status(SessionStatus::Ready);
            }
            Err(err) => {
                warn!(error = %err, "session bootstrap failed");
                self.store().set_status(SessionStatus::Failed);
            }
        }
        self.store().status()
    }
}
