//! Command implementations.

pub mod audit;
pub mod history;
pub mod nurse;
pub mod patient;
pub mod whoami;

use std::sync::Arc;

use anyhow::{Context, Result};

use siradu_client::{ApiClient, Credentials};
use siradu_core::{BaseUrl, UserIdentity};

use crate::cli::Connection;
use crate::notify::{TerminalNavigator, TerminalNotifier};

/// A signed-in client plus the account it authenticated as.
pub struct Console {
    pub client: ApiClient,
    pub user: UserIdentity,
}

/// Build a client and sign in with the connection credentials.
///
/// Tokens live only for this invocation, so every command starts here.
pub async fn connect(conn: &Connection) -> Result<Console> {
    let base = BaseUrl::new(conn.api()?).context("Invalid API base URL")?;
    let client = ApiClient::new(
        base,
        Arc::new(TerminalNotifier),
        Arc::new(TerminalNavigator),
    );

    let credentials = Credentials::new(conn.email()?, conn.password()?);
    let user = client
        .login(&credentials)
        .await
        .context("Failed to sign in")?;

    Ok(Console { client, user })
}
