//! Audit log viewer.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use siradu_client::ListQuery;

use crate::cli::Connection;
use crate::commands::connect;
use crate::models::AuditLog;
use crate::output;

#[derive(Args, Debug)]
pub struct AuditCommand {
    #[command(subcommand)]
    pub command: AuditSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuditSubcommand {
    /// List audit log entries
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page
    #[arg(long, default_value_t = 10)]
    pub page_size: u32,

    /// Filter by action or resource
    #[arg(long)]
    pub search: Option<String>,

    /// Print raw JSON instead of rows
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(conn: &Connection, cmd: AuditCommand) -> Result<()> {
    match cmd.command {
        AuditSubcommand::List(args) => list(conn, args).await,
    }
}

async fn list(conn: &Connection, args: ListArgs) -> Result<()> {
    let console = connect(conn).await?;

    let query = ListQuery {
        page: Some(args.page),
        page_size: Some(args.page_size),
        search: args.search.clone(),
        ..Default::default()
    };
    let page = console
        .client
        .list::<AuditLog>("audit-logs", &query)
        .await
        .context("Failed to list audit logs")?;

    if args.json {
        return output::json_pretty(&page.data);
    }

    if page.data.is_empty() {
        output::note("No audit entries found.");
        return Ok(());
    }

    for entry in &page.data {
        println!(
            "{}  {}  {} {}/{}",
            entry.timestamp.to_rfc3339(),
            entry.user_id,
            entry.action,
            entry.resource,
            entry.resource_id,
        );
    }
    output::note(&format!(
        "page {} · {} of {} total",
        page.page,
        page.data.len(),
        page.total
    ));

    Ok(())
}
