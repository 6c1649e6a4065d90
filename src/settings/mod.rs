//! Execution settings shared by every stage of the analysis.

use std::{
    fmt::{Display, Formatter},
    result::Result,
    str::FromStr,
    sync::{atomic::{AtomicBool, Ordering}, Arc},
};
use crate::error::{ConfigurationError, JpsthError};


/// How target spikes inside each trial window are located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// A single cursor walks the target train once across all trials, requires
    /// ascending reference events (always checked)
    #[default]
    ForwardCursor,
    /// Every trial window is located independently with a binary search, trials
    /// can be processed in parallel
    BinarySearch,
}

impl FromStr for ScanStrategy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward_cursor" | "cursor" => Ok(ScanStrategy::ForwardCursor),
            "binary_search" | "binary" => Ok(ScanStrategy::BinarySearch),
            _ => Err(ConfigurationError::UnrecognizedStrategy(String::from(s))),
        }
    }
}

impl Display for ScanStrategy {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ScanStrategy::ForwardCursor => write!(f, "forward_cursor"),
            ScanStrategy::BinarySearch => write!(f, "binary_search"),
        }
    }
}

/// Settings for running an analysis
#[derive(Debug, Clone, Default)]
pub struct AnalysisSettings {
    /// Strategy used to build histograms
    pub strategy: ScanStrategy,
    /// Use `true` to spread trial level work across threads
    pub parallel: bool,
    /// Flag checked between trials, once set the analysis stops with
    /// [`JpsthError::Cancelled`]
    pub cancel: Option<Arc<AtomicBool>>,
}

impl AnalysisSettings {
    /// Returns settings that process trials in parallel
    pub fn parallel() -> Self {
        AnalysisSettings { parallel: true, ..Default::default() }
    }

    /// Errors if cancellation was requested, `trial` is the trial about to be processed
    pub fn check_cancelled(&self, trial: usize) -> Result<(), JpsthError> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => {
                Err(JpsthError::Cancelled { trial })
            },
            _ => Ok(()),
        }
    }
}
