#![allow(dead_code)]

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Which table a lifecycle operation targets.
///
/// Proposals and research share every archival rule except two: only a
/// proposal carries a `status` column, and only research may be hard-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Proposal,
    Research,
}

impl RecordKind {
    /// Table name. Static, so it is safe to splice into SQL.
    pub fn table(self) -> &'static str {
        match self {
            RecordKind::Proposal => "proposals",
            RecordKind::Research => "research",
        }
    }

    /// Status written alongside the archival fields on reject, if the kind has one.
    pub fn rejected_status(self) -> Option<RecordStatus> {
        match self {
            RecordKind::Proposal => Some(RecordStatus::Rejected),
            RecordKind::Research => None,
        }
    }

    pub fn allows_hard_delete(self) -> bool {
        matches!(self, RecordKind::Research)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    /// Parses the URL segment (`proposals` / `research`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proposals" | "proposal" => Ok(RecordKind::Proposal),
            "research" => Ok(RecordKind::Research),
            other => Err(format!("Unknown record type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Active,
    Rejected,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Rejected => "rejected",
        }
    }
}

/// The slice of a proposal/research row the lifecycle subsystem reads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecordRow {
    pub id: Uuid,
    pub archived_at: Option<DateTime<Utc>>,
    pub archived_reason: Option<String>,
    pub report_path: Option<String>,
}

/// Fields written by a terminal transition.
///
/// Stores apply `archived_at` monotonically: an earlier value than the one
/// already stored leaves the stored timestamp untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPatch {
    pub archived_at: DateTime<Utc>,
    pub archived_reason: Option<String>,
    pub status: Option<RecordStatus>,
}

/// Blank or whitespace-only reasons are stored as null.
pub fn normalize_reason(reason: Option<String>) -> Option<String> {
    reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
}
