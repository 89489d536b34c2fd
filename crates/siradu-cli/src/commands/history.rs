//! Repositioning history viewers.
//!
//! History screens fetch silently: an empty range is normal, not an
//! error worth toasting.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use siradu_client::{CallOpts, ListQuery, SortOrder};

use crate::cli::Connection;
use crate::commands::connect;
use crate::models::HistoryEntry;
use crate::output;

#[derive(Args, Debug)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub command: HistorySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum HistorySubcommand {
    /// Repositioning events grouped by nurse
    Nurse(HistoryArgs),

    /// Repositioning events grouped by patient
    Patient(HistoryArgs),
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Range start, ISO date
    #[arg(long)]
    pub from: Option<String>,

    /// Range end, ISO date
    #[arg(long)]
    pub to: Option<String>,

    /// Page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page
    #[arg(long, default_value_t = 10)]
    pub page_size: u32,

    /// Filter by nurse or patient name
    #[arg(long)]
    pub search: Option<String>,

    /// Print raw JSON instead of rows
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(conn: &Connection, cmd: HistoryCommand) -> Result<()> {
    match cmd.command {
        HistorySubcommand::Nurse(args) => run(conn, "nurse-histories", args).await,
        HistorySubcommand::Patient(args) => run(conn, "patient-histories", args).await,
    }
}

async fn run(conn: &Connection, resource: &str, args: HistoryArgs) -> Result<()> {
    let console = connect(conn).await?;

    let query = ListQuery {
        page: Some(args.page),
        page_size: Some(args.page_size),
        search: args.search.clone(),
        sort_by: Some("Time".to_string()),
        sort_order: Some(SortOrder::Desc),
        start_date: args.from.clone(),
        end_date: args.to.clone(),
    };
    let page = console
        .client
        .list_with_opts::<HistoryEntry>(resource, &query, CallOpts::silent())
        .await
        .context("Failed to fetch history")?;

    if args.json {
        return output::json_pretty(&page.data);
    }

    if page.data.is_empty() {
        output::note("No rows in the selected range.");
        return Ok(());
    }

    for entry in &page.data {
        let nurse = entry.nurse.as_ref().map_or(entry.nurse_id.as_str(), |n| n.name.as_str());
        let patient = entry
            .patient
            .as_ref()
            .map_or(entry.patient_id.as_str(), |p| p.name.as_str());
        println!(
            "{}  {}  {} -> {}  bradenQ {}",
            entry.time, nurse, patient, entry.position, entry.braden_q
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
