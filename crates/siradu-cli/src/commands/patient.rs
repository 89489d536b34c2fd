//! Patient management commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::{Map, Value, json};

use siradu_client::{CallOpts, ListQuery};

use crate::cli::Connection;
use crate::commands::connect;
use crate::models::{Gender, Patient, PatientStatus};
use crate::output;

#[derive(Args, Debug)]
pub struct PatientCommand {
    #[command(subcommand)]
    pub command: PatientSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PatientSubcommand {
    /// List patients
    List(ListArgs),

    /// Admit a patient
    Add(AddArgs),

    /// Update a patient record
    Update(UpdateArgs),

    /// Remove a patient record
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

    /// Filter by name or NIK
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

    /// National identity number (16 digits)
    #[arg(long)]
    pub nik: String,

    /// ISO date of birth, e.g. 1954-07-17
    #[arg(long)]
    pub birth_date: String,

    #[arg(long)]
    pub bed_number: u32,

    #[arg(long, value_enum)]
    pub gender: Gender,

    /// Braden Q pressure-injury risk score
    #[arg(long)]
    pub braden_q: i32,

    #[arg(long, value_enum, default_value_t = PatientStatus::Active)]
    pub status: PatientStatus,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Patient id
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub bed_number: Option<u32>,

    #[arg(long)]
    pub braden_q: Option<i32>,

    #[arg(long, value_enum)]
    pub status: Option<PatientStatus>,
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Patient id
    pub id: String,
}

pub async fn handle(conn: &Connection, cmd: PatientCommand) -> Result<()> {
    match cmd.command {
        PatientSubcommand::List(args) => list(conn, args).await,
        PatientSubcommand::Add(args) => add(conn, args).await,
        PatientSubcommand::Update(args) => update(conn, args).await,
        PatientSubcommand::Rm(args) => rm(conn, args).await,
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
        .list::<Patient>("patient", &query)
        .await
        .context("Failed to list patients")?;

    if args.json {
        return output::json_pretty(&page.data);
    }

    if page.data.is_empty() {
        output::note("No patients found.");
        return Ok(());
    }

    for patient in &page.data {
        println!(
            "{}  {}  bed {}  {}  bradenQ {}  {}",
            patient.id,
            patient.name,
            patient.bed_number,
            patient.gender,
            patient.braden_q,
            patient.status,
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

async fn add(conn: &Connection, args: AddArgs) -> Result<()> {
    let console = connect(conn).await?;

    let body = json!({
        "name": args.name,
        "nik": args.nik,
        "birthDate": args.birth_date,
        "bedNumber": args.bed_number,
        "gender": args.gender,
        "bradenQ": args.braden_q,
        "status": args.status,
    });
    console
        .client
        .create::<_, Value>(
            "patient",
            &body,
            CallOpts::default().with_success_message("Patient admitted"),
        )
        .await
        .context("Failed to admit patient")?;

    Ok(())
}

async fn update(conn: &Connection, args: UpdateArgs) -> Result<()> {
    let console = connect(conn).await?;

    let mut body = Map::new();
    if let Some(name) = args.name {
        body.insert("name".to_string(), Value::String(name));
    }
    if let Some(bed_number) = args.bed_number {
        body.insert("bedNumber".to_string(), json!(bed_number));
    }
    if let Some(braden_q) = args.braden_q {
        body.insert("bradenQ".to_string(), json!(braden_q));
    }
    if let Some(status) = args.status {
        body.insert("status".to_string(), json!(status));
    }

    console
        .client
        .update::<_, Value>(
            "patient",
            &args.id,
            &Value::Object(body),
            CallOpts::default().with_success_message("Patient updated"),
        )
        .await
        .context("Failed to update patient")?;

    Ok(())
}

async fn rm(conn: &Connection, args: RmArgs) -> Result<()> {
    let console = connect(conn).await?;

    console
        .client
        .remove(
            "patient",
            &args.id,
            CallOpts::default().with_success_message("Patient removed"),
        )
        .await
        .context("Failed to remove patient")?;

    Ok(())
}
