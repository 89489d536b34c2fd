//! Error types for the Siradu client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, API, authentication, and input validation errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The unified error type for Siradu client operations.
///
/// Every failure mode ultimately propagates to the caller as one of
/// these variants, after any notification side effect has fired.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, undecodable body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-2xx responses from the backend.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Session renewal failures.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Input validation errors (invalid base URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
///
/// Covers everything where no usable response came back: the request
/// never reached the server, or the body could not be parsed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
///
/// `Clone` so a single refresh failure can be handed to every request
/// queued behind the in-flight renewal.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The session renewal call failed; the session has been invalidated.
    #[error("session refresh failed: {reason}")]
    RefreshFailed { reason: String },

    /// A queued request's waiter was dropped before the refresh settled.
    #[error("refresh coordinator went away before settling")]
    CoordinatorGone,
}

/// A non-2xx response from the backend.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Structured error code from the response body (if present).
    pub error: Option<String>,
    /// Human-readable message from the response body.
    pub message: Option<Message>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, error: Option<String>, message: Option<Message>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check whether this response means the access token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// A `message` field from a response body: a single string or a list.
///
/// The backend is inconsistent about which it sends, so both shapes
/// deserialize; lists render joined with commas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    One(String),
    Many(Vec<String>),
}

impl Message {
    /// The message as a single display string.
    pub fn joined(&self) -> String {
        match self {
            Message::One(s) => s.clone(),
            Message::Many(parts) => parts.join(", "),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined())
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },
}
