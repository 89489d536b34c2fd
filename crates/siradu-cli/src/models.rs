//! Row types for the admin resources.
//!
//! These mirror the backend's business schema; the client library is
//! deliberately ignorant of them.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nurse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub nik: String,
    /// ISO date of birth.
    pub birth_date: String,
    pub bed_number: u32,
    pub gender: Gender,
    pub braden_q: i32,
    pub status: PatientStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    #[value(name = "LAKI_LAKI")]
    LakiLaki,
    #[value(name = "PEREMPUAN")]
    Perempuan,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::LakiLaki => write!(f, "LAKI_LAKI"),
            Gender::Perempuan => write!(f, "PEREMPUAN"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientStatus {
    #[value(name = "ACTIVE")]
    Active,
    #[value(name = "NON_ACTIVE")]
    NonActive,
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientStatus::Active => write!(f, "ACTIVE"),
            PatientStatus::NonActive => write!(f, "NON_ACTIVE"),
        }
    }
}

/// One repositioning event, as listed by the history screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub patient_id: String,
    pub nurse_id: String,
    pub position: String,
    pub braden_q: i32,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default)]
    pub patient: Option<NameRef>,
    #[serde(default)]
    pub nurse: Option<NameRef>,
}

/// A joined id/name pair embedded in history rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: String,
    pub user_id: String,
    pub action: String,
    pub resource: String,
    pub resource_id: String,
    #[serde(default)]
    pub changes: Value,
    pub timestamp: DateTime<Utc>,
}
