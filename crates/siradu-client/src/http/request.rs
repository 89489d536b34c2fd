//! Outbound request descriptors and per-call presentation flags.

use reqwest::Method;
use serde_json::Value;

/// Per-call presentation flags.
///
/// All default to unset; the embedding code opts in or out of
/// notifications per request.
///
/// # Example
///
/// ```
/// use siradu_client::CallOpts;
///
/// // surface the backend's message on success
/// let opts = CallOpts::success_toast();
///
/// // fail quietly, keep the error for the caller
/// let opts = CallOpts::silent();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallOpts {
    /// Suppress all success and error notifications for this call.
    pub silent: bool,
    /// Surface a success notification if the body carries a message.
    pub success_toast: bool,
    /// `Some(false)` suppresses only the error notification.
    pub error_toast: Option<bool>,
    /// Literal override for the success notification text.
    pub success_message: Option<String>,
    /// Literal override for the error notification text.
    pub error_message: Option<String>,
}

impl CallOpts {
    /// Flags that suppress every notification.
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    /// Flags that request a success notification.
    pub fn success_toast() -> Self {
        Self {
            success_toast: true,
            ..Self::default()
        }
    }

    /// Override the success notification text.
    pub fn with_success_message(mut self, text: impl Into<String>) -> Self {
        self.success_message = Some(text.into());
        self
    }

    /// Override the error notification text.
    pub fn with_error_message(mut self, text: impl Into<String>) -> Self {
        self.error_message = Some(text.into());
        self
    }

    /// Suppress only the error notification.
    pub fn without_error_toast(mut self) -> Self {
        self.error_toast = Some(false);
        self
    }

    pub(crate) fn error_notification_enabled(&self) -> bool {
        !self.silent && self.error_toast != Some(false)
    }

    pub(crate) fn success_notification_requested(&self) -> bool {
        !self.silent && (self.success_toast || self.success_message.is_some())
    }
}

/// A single outbound HTTP call, described so it can be rebuilt.
///
/// Dispatch may send the same logical request twice: once with the
/// expired token and once after renewal. A descriptor (rather than a
/// built `reqwest::Request`) keeps the replay trivial. The `retried`
/// marker is set before the replay and never cleared, so one request
/// passes through the refresh path at most once.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Value>,
    pub(crate) opts: CallOpts,
    pub(crate) retried: bool,
}

impl RequestSpec {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            opts: CallOpts::default(),
            retried: false,
        }
    }

    /// A GET request for the given API path.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A POST request for the given API path.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// A PUT request for the given API path.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// A DELETE request for the given API path.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Replace the query parameters wholesale.
    pub fn query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    /// Set the presentation flags.
    pub fn opts(mut self, opts: CallOpts) -> Self {
        self.opts = opts;
        self
    }
}
