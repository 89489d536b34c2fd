//! Response-body conventions the dispatcher inspects.

use serde_json::Value;

use siradu_core::Message;

use super::request::CallOpts;

/// Shown when no better error text can be derived from the response.
pub(crate) const FALLBACK_ERROR: &str = "Something went wrong. Please try again.";

/// The `{success, error, message}` fields a Siradu response body may
/// carry, regardless of transport status.
#[derive(Debug, Default)]
pub(crate) struct ApiEnvelope {
    pub success: Option<bool>,
    pub error: Option<String>,
    pub message: Option<Message>,
}

impl ApiEnvelope {
    /// Pick the envelope fields out of an arbitrary body.
    ///
    /// Anything that is not an object, or carries none of the fields,
    /// parses to an empty envelope.
    pub fn parse(body: &Value) -> Self {
        let success = body.get("success").and_then(Value::as_bool);
        let error = body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string);
        let message = body
            .get("message")
            .cloned()
            .and_then(|v| serde_json::from_value::<Message>(v).ok());
        Self {
            success,
            error,
            message,
        }
    }

    /// Whether the body flags an application-level failure despite a
    /// 2xx transport status.
    pub fn signals_failure(&self) -> bool {
        self.success == Some(false)
    }
}

/// Derive the error notification text.
///
/// Precedence: per-call override > structured `error` field > `message`
/// field (lists joined with commas) > transport error text > generic
/// fallback.
pub(crate) fn error_text(
    opts: &CallOpts,
    envelope: &ApiEnvelope,
    transport: Option<&str>,
) -> String {
    opts.error_message
        .clone()
        .or_else(|| envelope.error.clone())
        .or_else(|| envelope.message.as_ref().map(Message::joined))
        .or_else(|| transport.map(str::to_string))
        .unwrap_or_else(|| FALLBACK_ERROR.to_string())
}
