//! CLI argument definitions.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::commands::audit::AuditCommand;
use crate::commands::history::HistoryCommand;
use crate::commands::nurse::NurseCommand;
use crate::commands::patient::PatientCommand;

/// Siradu admin console, terminal edition.
#[derive(Parser, Debug)]
#[command(name = "siradu")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: Connection,

    #[command(subcommand)]
    pub command: Commands,
}

/// How to reach and authenticate with the backend.
///
/// Tokens are never persisted between invocations; every run signs in
/// with these credentials.
#[derive(Args, Debug)]
pub struct Connection {
    /// API base URL
    #[arg(long, env = "SIRADU_API", global = true)]
    pub api: Option<String>,

    /// Dashboard account email
    #[arg(long, env = "SIRADU_EMAIL", global = true)]
    pub email: Option<String>,

    /// Dashboard account password
    #[arg(long, env = "SIRADU_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,
}

impl Connection {
    pub fn api(&self) -> Result<&str> {
        self.api
            .as_deref()
            .context("API base URL required (--api or SIRADU_API)")
    }

    pub fn email(&self) -> Result<&str> {
        self.email
            .as_deref()
            .context("Account email required (--email or SIRADU_EMAIL)")
    }

    pub fn password(&self) -> Result<&str> {
        self.password
            .as_deref()
            .context("Account password required (--password or SIRADU_PASSWORD)")
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the authenticated account
    Whoami,

    /// Nurse management
    Nurse(NurseCommand),

    /// Patient management
    Patient(PatientCommand),

    /// Repositioning history viewers
    History(HistoryCommand),

    /// Audit log viewer
    Audit(AuditCommand),
}
