//! Roster loading.
//!
//! Student rosters are read from CSV (header
//! `id,enrollment,name,section,elective,gender`) or from a JSON array of
//! records. The format is chosen by file extension.

use crate::models::StudentRecord;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV roster: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid JSON roster: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported roster format {extension:?} (expected .csv or .json)")]
    UnsupportedFormat { extension: String },
}

/// Supported roster file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Csv,
    Json,
}

impl RosterFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, RosterError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "csv" => Ok(RosterFormat::Csv),
            "json" => Ok(RosterFormat::Json),
            _ => Err(RosterError::UnsupportedFormat { extension }),
        }
    }
}

/// Parse CSV roster data.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<StudentRecord>, RosterError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for result in reader.deserialize::<StudentRecord>() {
        records.push(result?);
    }

    Ok(records)
}

/// Parse a JSON array of records.
pub fn parse_json(content: &str) -> Result<Vec<StudentRecord>, RosterError> {
    Ok(serde_json::from_str(content)?)
}

/// Load a roster from disk.
pub fn load_roster(path: &Path) -> Result<Vec<StudentRecord>, RosterError> {
    let format = RosterFormat::from_path(path)?;
    debug!("Loading {:?} roster from {}", format, path.display());

    let content = fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = match format {
        RosterFormat::Csv => parse_csv(content.as_bytes())?,
        RosterFormat::Json => parse_json(&content)?,
    };

    info!("Loaded {} students from {}", records.len(), path.display());
    Ok(records)
}
