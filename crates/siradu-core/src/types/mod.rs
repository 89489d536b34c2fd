//! Core wire and session types.

mod base_url;
mod identity;
mod session;

pub use base_url::BaseUrl;
pub use identity::{RoleName, UserIdentity, UserRole};
pub use session::SessionStatus;
