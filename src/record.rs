use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::session::Summary;

/// One saved session, shaped exactly like a row of the score file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Set")]
    pub set: String,
    #[serde(rename = "Time (s)")]
    pub time_secs: u32,
    #[serde(rename = "Score")]
    pub score: u32,
    #[serde(rename = "Attempted")]
    pub attempted: u32,
    #[serde(rename = "Percent")]
    pub percent: String,
}

impl ScoreRecord {
    pub fn from_summary(summary: &Summary, saved_at: DateTime<Local>) -> Self {
        Self {
            date: saved_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            set: summary.set_name.clone(),
            time_secs: summary.duration_secs,
            score: summary.score,
            attempted: summary.attempted,
            percent: summary.percent_label(),
        }
    }
}

/// Append-only CSV score history. Rows are only ever added, never edited or
/// removed; append order is chronological, so "most recent" is "last in
/// file".
pub struct ScoreRecorder {
    path: PathBuf,
}

pub const SCORE_FILE_NAME: &str = "scores.csv";

impl ScoreRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record. The first write creates the file (and its parent
    /// directory) with a header row; later writes append the bare row.
    pub fn append(&self, record: &ScoreRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let needs_header = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// The most recent `n` records in file order. A store that does not
    /// exist yet reads as empty.
    pub fn recent(&self, n: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for row in reader.deserialize::<ScoreRecord>() {
            rows.push(row?);
        }

        let skip = rows.len().saturating_sub(n);
        Ok(rows.split_off(skip))
    }
}
