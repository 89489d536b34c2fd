//! siradu-client - HTTP client for the Siradu admin API.
//!
//! Every call flows through an [`ApiClient`], which attaches the current
//! bearer token, surfaces success/error messages through the embedding
//! application's notifier, and transparently renews the session when the
//! backend rejects an expired token: the first 401 triggers a single
//! renewal call, concurrent requests queue behind it and replay with the
//! new token, and an unrecoverable renewal failure logs the session out.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use siradu_client::{ApiClient, Credentials, ListQuery, Page};
//! use siradu_core::traits::{NoopNavigator, NoopNotifier};
//! use siradu_core::BaseUrl;
//!
//! # async fn example() -> Result<(), siradu_core::Error> {
//! let base = BaseUrl::new("https://api.siradu.example")?;
//! let client = ApiClient::new(base, Arc::new(NoopNotifier), Arc::new(NoopNavigator));
//!
//! let user = client.login(&Credentials::new("admin@example.com", "secret")).await?;
//! println!("signed in as {}", user.name);
//!
//! let nurses: Page<serde_json::Value> =
//!     client.list("nurse", &ListQuery::default()).await?;
//! println!("{} nurses", nurses.total);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod http;
pub mod resource;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, CredentialStore, Credentials};
pub use http::{ApiClient, CallOpts, RequestSpec};
pub use resource::{ListQuery, Page, SortOrder};
