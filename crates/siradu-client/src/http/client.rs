//! The request dispatcher.
//!
//! [`ApiClient`] decorates every outbound call with the current bearer
//! token and uniform success/error presentation, and hands authorization
//! failures to the refresh gate.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

use siradu_core::error::{ApiError, TransportError};
use siradu_core::{AuthError, BaseUrl, Error, Message, Navigator, Notifier, Result};

use crate::auth::{AccessToken, CredentialStore, REFRESH_SESSION, RefreshSessionResponse};

use super::envelope::{ApiEnvelope, error_text};
use super::refresh::{RefreshEntry, RefreshGate};
use super::request::{CallOpts, RequestSpec};

/// Renewal is bounded so a hung endpoint cannot wedge every queued
/// request indefinitely; expiry counts as a renewal failure.
const REFRESH_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the Siradu admin API.
///
/// Cheap to clone (internal `Arc`); one instance per backend is shared
/// across the whole application so that the credential store, the
/// ambient refresh cookie, and the single-flight renewal gate are
/// process-wide.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base: BaseUrl,
    store: CredentialStore,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    gate: RefreshGate,
}

impl ApiClient {
    /// Create a new client for the given API base URL.
    ///
    /// The cookie store holds the ambient refresh credential the
    /// backend sets at login.
    pub fn new(base: BaseUrl, notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("siradu-client/", env!("CARGO_PKG_VERSION")))
            .cookie_store(true)
            .build()
            .expect("failed to build HTTP client");

        Self {
            inner: Arc::new(ClientInner {
                http,
                base,
                store: CredentialStore::new(),
                notifier,
                navigator,
                gate: RefreshGate::new(),
            }),
        }
    }

    /// The API base URL this client is configured for.
    pub fn base(&self) -> &BaseUrl {
        &self.inner.base
    }

    /// The credential store backing this client.
    pub fn store(&self) -> &CredentialStore {
        &self.inner.store
    }

    /// Dispatch a request, renewing the session once if the backend
    /// rejects the current token.
    #[instrument(skip(self, spec), fields(method = %spec.method, path = %spec.path))]
    pub async fn request(&self, mut spec: RequestSpec) -> Result<Value> {
        loop {
            match self.send_once(&spec).await {
                Err(Error::Api(err)) if err.is_unauthorized() && !spec.retried => {
                    // Marked synchronously, before any suspension: a
                    // second 401 on this request can never start
                    // another renewal.
                    spec.retried = true;
                    self.fresh_token().await?;
                }
                outcome => return outcome,
            }
        }
    }

    /// Make a GET request and decode the response body.
    pub async fn get<R>(&self, path: &str, opts: CallOpts) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let value = self.request(RequestSpec::get(path).opts(opts)).await?;
        decode(value)
    }

    /// Make a POST request with a JSON body and decode the response.
    pub async fn post<B, R>(&self, path: &str, body: &B, opts: CallOpts) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let spec = RequestSpec::post(path).body(encode(body)?).opts(opts);
        decode(self.request(spec).await?)
    }

    /// Make a PUT request with a JSON body and decode the response.
    pub async fn put<B, R>(&self, path: &str, body: &B, opts: CallOpts) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let spec = RequestSpec::put(path).body(encode(body)?).opts(opts);
        decode(self.request(spec).await?)
    }

    /// Make a DELETE request and decode the response.
    pub async fn delete<R>(&self, path: &str, opts: CallOpts) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let value = self.request(RequestSpec::delete(path).opts(opts)).await?;
        decode(value)
    }

    /// One transmission of the request: attach the current token, send,
    /// inspect the body, fire notifications.
    async fn send_once(&self, spec: &RequestSpec) -> Result<Value> {
        let url = self.inner.base.endpoint(&spec.path);
        trace!(%url, "dispatching request");

        let mut builder = self.inner.http.request(spec.method.clone(), &url);
        if !spec.query.is_empty() {
            builder = builder.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            builder = builder.json(body);
        }
        if let Some(token) = self.inner.store.access_token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.as_str()));
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                let transport = transport_error(err);
                self.notify_error(&spec.opts, &ApiEnvelope::default(), Some(&transport.to_string()));
                return Err(transport.into());
            }
        };

        let status = response.status();
        trace!(status = %status, "response received");

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                let transport = transport_error(err);
                self.notify_error(&spec.opts, &ApiEnvelope::default(), Some(&transport.to_string()));
                return Err(transport.into());
            }
        };

        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(err) if status.is_success() => {
                    let transport = TransportError::Decode {
                        message: err.to_string(),
                    };
                    self.notify_error(&spec.opts, &ApiEnvelope::default(), Some(&transport.to_string()));
                    return Err(transport.into());
                }
                // Non-JSON error bodies (a bare 502 page, say) still
                // produce a usable ApiError below.
                Err(_) => Value::Null,
            }
        };

        let envelope = ApiEnvelope::parse(&body);

        if status.is_success() {
            // A 2xx body may still flag a logical failure; that is
            // notified, never returned as Err.
            if envelope.signals_failure() {
                self.notify_error(&spec.opts, &envelope, None);
            }
            self.notify_success(&spec.opts, &envelope);
            return Ok(body);
        }

        // A first 401 is handed to the refresh gate and may still
        // succeed on replay; only terminal failures notify.
        let unauthorized = status.as_u16() == 401;
        if !unauthorized || spec.retried {
            self.notify_error(&spec.opts, &envelope, None);
        }
        Err(ApiError::new(status.as_u16(), envelope.error, envelope.message).into())
    }

    /// Wait for a usable token after a 401: park behind the in-flight
    /// renewal or lead a new one.
    async fn fresh_token(&self) -> Result<()> {
        match self.inner.gate.enter() {
            RefreshEntry::Waiter(rx) => match rx.await {
                Ok(Ok(_token)) => Ok(()),
                Ok(Err(failure)) => Err(failure.into()),
                Err(_) => Err(AuthError::CoordinatorGone.into()),
            },
            RefreshEntry::Leader => {
                let outcome = self
                    .renew_session()
                    .await
                    .map(|renewed| AccessToken::new(renewed.access_token));
                self.inner.gate.settle(&outcome);
                match outcome {
                    Ok(_token) => Ok(()),
                    Err(failure) => {
                        self.inner.store.logout();
                        if !self.inner.navigator.on_login_view() {
                            self.inner.navigator.redirect_to_login();
                        }
                        Err(failure.into())
                    }
                }
            }
        }
    }

    /// Call the renewal endpoint directly.
    ///
    /// Deliberately not routed through [`request`](Self::request): the
    /// renewal itself must never trigger another renewal. The ambient
    /// cookie authenticates the call; no bearer header is attached.
    /// On success the new token is already stored when this returns.
    #[instrument(skip(self))]
    pub(crate) async fn renew_session(
        &self,
    ) -> std::result::Result<RefreshSessionResponse, AuthError> {
        let url = self.inner.base.endpoint(REFRESH_SESSION);
        debug!("renewing session");

        let response = self
            .inner
            .http
            .post(&url)
            .timeout(REFRESH_TIMEOUT)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "session renewal transport failure");
                AuthError::RefreshFailed {
                    reason: err.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "session renewal rejected");
            return Err(AuthError::RefreshFailed {
                reason: format!("renewal endpoint returned HTTP {}", status.as_u16()),
            });
        }

        let body: RefreshSessionResponse =
            response.json().await.map_err(|err| AuthError::RefreshFailed {
                reason: err.to_string(),
            })?;

        self.inner
            .store
            .set_access_token(AccessToken::new(body.access_token.clone()));
        debug!("session renewed");
        Ok(body)
    }

    fn notify_error(&self, opts: &CallOpts, envelope: &ApiEnvelope, transport: Option<&str>) {
        if opts.error_notification_enabled() {
            self.inner
                .notifier
                .error(&error_text(opts, envelope, transport));
        }
    }

    fn notify_success(&self, opts: &CallOpts, envelope: &ApiEnvelope) {
        if !opts.success_notification_requested() {
            return;
        }
        let text = opts
            .success_message
            .clone()
            .or_else(|| envelope.message.as_ref().map(Message::joined));
        if let Some(text) = text {
            self.inner.notifier.success(&text);
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.inner.base)
            .field("store", &self.inner.store)
            .finish()
    }
}

fn transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    }
}

/// Serialize a request body to JSON.
pub(crate) fn encode<B: Serialize>(body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(|err| {
        TransportError::Decode {
            message: err.to_string(),
        }
        .into()
    })
}

/// Deserialize a response body from JSON.
pub(crate) fn decode<R: DeserializeOwned>(value: Value) -> Result<R> {
    serde_json::from_value(value).map_err(|err| {
        TransportError::Decode {
            message: err.to_string(),
        }
        .into()
    })
}
