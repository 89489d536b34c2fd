//! Nurse management commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::{Map, Value, json};

use siradu_client::{CallOpts, ListQuery};

use crate::cli::Connection;
use crate::commands::connect;
use crate::models::Nurse;
use crate::output;

#[derive(Args, Debug)]
pub struct NurseCommand {
    #[command(subcommand)]
    pub command: NurseSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum NurseSubcommand {
    /// List nurses
    List(ListArgs),

    /// Register a nurse account
    Add(AddArgs),

    /// Update a nurse account
    Update(UpdateArgs),

    /// Remove a nurse account
    Rm(RmArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page
    #[arg(long, default_value_t = 10)]
    pub page_size: u32,

    /// Filter by name or email
    #[arg(long)]
    pub search: Option<String>,

    /// Print raw JSON instead of rows
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Nurse id
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// New password (omit to keep the current one)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Nurse id
    pub id: String,
}

pub async fn handle(conn: &Connection, cmd: NurseCommand) -> Result<()> {
    match cmd.command {
        NurseSubcommand::List(args) => list(conn, args).await,
        NurseSubcommand::Add(args) => add(conn, args).await,
        NurseSubcommand::Update(args) => update(conn, args).await,
        NurseSubcommand::Rm(args) => rm(conn, args).await,
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
        .list::<Nurse>("nurse", &query)
        .await
        .context("Failed to list nurses")?;

    if args.json {
        return output::json_pretty(&page.data);
    }

    if page.data.is_empty() {
        output::note("No nurses found.");
        return Ok(());
    }

    for nurse in &page.data {
        println!("{}  {}  <{}>", nurse.id, nurse.name, nurse.email);
    }
    output::note(&format!(
        "page {} · {} of {} total",
        page.page,
        page.data.len(),
        page.total
    ));

    Ok(())
}

async fn add(conn: &Connection, args: AddArgs) -> Result<()> {
    let console = connect(conn).await?;

    let body = json!({
        "name": args.name,
        "email": args.email,
        "password": args.password,
    });
    console
        .client
        .create::<_, Value>(
            "nurse",
            &body,
            CallOpts::default().with_success_message("Nurse added"),
        )
        .await
        .context("Failed to add nurse")?;

    Ok(())
}

async fn update(conn: &Connection, args: UpdateArgs) -> Result<()> {
    let console = connect(conn).await?;

    // Only send the fields being changed; a blank password must not
    // overwrite the stored one.
    let mut body = Map::new();
    if let Some(name) = args.name {
        body.insert("name".to_string(), Value::String(name));
    }
    if let Some(email) = args.email {
        body.insert("email".to_string(), Value::String(email));
    }
    if let Some(password) = args.password {
        body.insert("password".to_string(), Value::String(password));
    }

    console
        .client
        .update::<_, Value>(
            "nurse",
            &args.id,
            &Value::Object(body),
            CallOpts::default().with_success_message("Nurse updated"),
        )
        .await
        .context("Failed to update nurse")?;

    Ok(())
}

async fn rm(conn: &Connection, args: RmArgs) -> Result<()> {
    let console = connect(conn).await?;

    console
        .client
        .remove(
            "nurse",
            &args.id,
            CallOpts::default().with_success_message("Nurse removed"),
        )
        .await
        .context("Failed to remove nurse")?;

    Ok(())
}
