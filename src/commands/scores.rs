use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::palette::Palette;
use crate::record::{SCORE_FILE_NAME, ScoreRecord, ScoreRecorder};
use crate::utils::get_data_dir;

pub fn run(limit: usize, file: Option<PathBuf>) -> Result<()> {
    let recorder = match file {
        Some(path) => ScoreRecorder::new(path),
        None => default_recorder()?,
    };
    let records = recorder
        .recent(limit)
        .with_context(|| format!("Failed to read scores from {}", recorder.path().display()))?;
    render_recent(&records);
    Ok(())
}

pub fn default_recorder() -> Result<ScoreRecorder> {
    Ok(ScoreRecorder::new(get_data_dir()?.join(SCORE_FILE_NAME)))
}

/// Prints saved records oldest first, so the latest session reads last.
pub fn render_recent(records: &[ScoreRecord]) {
    println!("{}", Palette::paint(Palette::ACCENT, "Recent Scores"));
    if records.is_empty() {
        println!("{}", Palette::dim("No saved scores yet."));
        return;
    }

    for record in records {
        println!(
            "{}  {}  {}  {}",
            Palette::dim(&record.date),
            Palette::paint(Palette::INFO, format!("{:<16}", record.set)),
            Palette::dim(format!("{:>4}s", record.time_secs)),
            Palette::paint(
                Palette::SUCCESS,
                format!("{}/{} ({}%)", record.score, record.attempted, record.percent)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_recent_handles_empty_and_populated_stores() {
        render_recent(&[]);
        render_recent(&[ScoreRecord {
            date: "2024-03-01 09:30:00".into(),
            set: "Section C".into(),
            time_secs: 60,
            score: 5,
            attempted: 6,
            percent: "83.3".into(),
        }]);
    }
}
