//! Sources of recorded timestamps, the analysis itself only ever sees slices so
//! anything able to produce an ascending `Vec<f64>` can feed it.

use std::{fs::read_to_string, path::PathBuf, result::Result};
use crate::error::{DataError, JpsthError};
use crate::spike_train::check_ascending;


/// Supplies a train of timestamps (seconds)
pub trait TimestampSource {
    /// Name of the source used in log messages
    fn name(&self) -> String;
    /// Reads every timestamp of the source
    fn timestamps(&self) -> Result<Vec<f64>, JpsthError>;
}

/// Parses text with one timestamp per line, blank lines are skipped
pub fn parse_timestamps(content: &str) -> Result<Vec<f64>, DataError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim().parse::<f64>().map_err(|_| DataError::UnparsableTimestamp {
                line: i + 1,
                content: String::from(line),
            })
        })
        .collect()
}

/// A text file with one timestamp per line
#[derive(Debug, Clone)]
pub struct TextTimestampSource {
    pub path: PathBuf,
}

impl TextTimestampSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        TextTimestampSource { path: path.into() }
    }
}

impl TimestampSource for TextTimestampSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn timestamps(&self) -> Result<Vec<f64>, JpsthError> {
        let content = read_to_string(&self.path)?;
        let timestamps = parse_timestamps(&content)?;

        tracing::debug!("read {} timestamps from {}", timestamps.len(), self.name());

        Ok(timestamps)
    }
}

/// Reads a source and checks that it is ascending
pub fn read_train<S: TimestampSource>(train: &'static str, source: &S) -> Result<Vec<f64>, JpsthError> {
    let timestamps = source.timestamps()?;
    check_ascending(train, &timestamps)?;

    Ok(timestamps)
}
