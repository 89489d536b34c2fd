//! Authentication: credentials, tokens, and the credential store.
//!
//! Session operations (`login`, `logout`, `bootstrap`) live on
//! [`ApiClient`](crate::ApiClient) and are implemented in
//! [`session`](self::session).

mod credentials;
mod session;
mod store;
mod tokens;

pub use credentials::Credentials;
pub use store::CredentialStore;
pub use tokens::AccessToken;

pub(crate) use session::RefreshSessionResponse;
pub(crate) use session::REFRESH_SESSION;
