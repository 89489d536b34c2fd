//! siradu-core - Shared types for the Siradu admin console client.
//!
//! This crate holds the pieces every front end needs: the unified error
//! taxonomy, validated wire types, and the collaborator traits through
//! which the client surfaces notifications and session-loss redirects.
//! It contains no network code.

pub mod error;
pub mod traits;
pub mod types;

// Re-export primary types at crate root for convenience
pub use error::{ApiError, AuthError, Error, Message};
pub use traits::{Navigator, Notifier};
pub use types::{BaseUrl, RoleName, SessionStatus, UserIdentity, UserRole};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
