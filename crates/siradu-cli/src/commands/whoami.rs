//! Whoami command implementation.

use anyhow::Result;

use crate::cli::Connection;
use crate::commands::connect;
use crate::output;

pub async fn run(conn: &Connection) -> Result<()> {
    let console = connect(conn).await?;

    let roles = console
        .user
        .roles
        .iter()
        .map(|r| r.name.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    output::field("Name", &console.user.name);
    output::field("Email", &console.user.email);
    output::field("Roles", if roles.is_empty() { "-" } else { roles.as_str() });
    output::field("API", console.client.base().as_str());

    Ok(())
}
