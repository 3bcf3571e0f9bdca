//! Append-only CSV record of every completed turn.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::Result;

pub const AUDIT_HEADER: [&str; 5] = [
    "DateTime",
    "User Query",
    "Finished Chain",
    "Final AI Response",
    "SQL Command",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How a turn ended. The literal goes into the "Finished Chain" column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Finished,
    Error,
}

impl TurnStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnStatus::Finished => "Finished",
            TurnStatus::Error => "Error",
        }
    }
}

/// One audit row, timestamped at construction.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub timestamp: DateTime<Local>,
    pub user_query: String,
    pub status: TurnStatus,
    pub final_response: String,
    pub sql_command: String,
}

impl AuditRecord {
    pub fn new(
        user_query: impl Into<String>,
        status: TurnStatus,
        final_response: impl Into<String>,
        sql_command: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            user_query: user_query.into(),
            status,
            final_response: final_response.into(),
            sql_command: sql_command.into(),
        }
    }
}

pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the header first when the file is new
    /// or empty.
    pub fn record(&self, record: &AuditRecord) -> Result<()> {
        let needs_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(AUDIT_HEADER)?;
        }

        let timestamp = record.timestamp.format(TIMESTAMP_FORMAT).to_string();
        writer.write_record([
            timestamp.as_str(),
            record.user_query.as_str(),
            record.status.as_str(),
            record.final_response.as_str(),
            record.sql_command.as_str(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}
