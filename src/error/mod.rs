use std::io;
use thiserror::Error;


/// Error set for invalid analysis windows
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WindowError {
    /// Bin size must be a positive finite number
    #[error("Bin size must be positive and finite, got {0}")]
    NonPositiveBinSize(f64),
    /// Right boundary of the window must be greater than the left boundary
    #[error("Window right boundary ({x_max}) must be greater than left boundary ({x_min})")]
    EmptyInterval { x_min: f64, x_max: f64 },
    /// Window boundaries must be finite
    #[error("Window boundaries must be finite, got [{x_min}, {x_max}]")]
    NonFiniteBoundary { x_min: f64, x_max: f64 },
    /// Bin size is wider than the window so not a single full bin fits
    #[error("Bin size {bin_size} leaves no full bin inside a window of width {width}")]
    NoBins { width: f64, bin_size: f64 },
}

/// Error set for invalid or mismatched analysis configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Window could not be built
    #[error("{0}")]
    InvalidWindow(#[from] WindowError),
    /// The two histogram matrices being combined must have the same number of trials
    #[error("Trial counts do not match (select: {select}, bottom: {bottom})")]
    TrialCountMismatch { select: usize, bottom: usize },
    /// The two histogram matrices being combined must have the same number of bins
    #[error("Bin counts do not match (select: {select}, bottom: {bottom})")]
    BinCountMismatch { select: usize, bottom: usize },
    /// Normalization mode name is not recognized
    #[error("Unrecognized normalization mode: {0}")]
    UnrecognizedMode(String),
    /// Scan strategy name is not recognized
    #[error("Unrecognized scan strategy: {0}")]
    UnrecognizedStrategy(String),
    /// Boundary policy name is not recognized
    #[error("Unrecognized boundary policy: {0}")]
    UnrecognizedBoundary(String),
    /// Histograms of this size cannot be allocated
    #[error("Cannot allocate histograms for {trials} trials of {bins} bins")]
    TooLarge { trials: usize, bins: usize },
    /// A configuration field is missing or has the wrong type
    #[error("Cannot parse {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

/// Error set for spike data that cannot be analyzed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// Timestamps must be in ascending order
    #[error("{train} train is not ascending at index {index} ({previous} > {current})")]
    NotAscending { train: &'static str, index: usize, previous: f64, current: f64 },
    /// Timestamps must be finite
    #[error("{train} train has a non-finite timestamp at index {index}")]
    NonFiniteTimestamp { train: &'static str, index: usize },
    /// At least one reference event is required to define a trial
    #[error("Reference event train is empty")]
    EmptyReference,
    /// Averages are undefined without trials
    #[error("Cannot aggregate a joint histogram with zero trials")]
    NoTrials,
    /// A line of a timestamp source could not be read as a number
    #[error("Cannot parse timestamp on line {line}: {content:?}")]
    UnparsableTimestamp { line: usize, content: String },
}

/// A set of errors that may occur when using the library
#[derive(Error, Debug)]
pub enum JpsthError {
    /// Errors related to the analysis configuration
    #[error("{0}")]
    ConfigurationRelatedError(#[from] ConfigurationError),
    /// Errors related to the spike data
    #[error("{0}")]
    DataRelatedError(#[from] DataError),
    /// Analysis was cancelled between trials
    #[error("Analysis cancelled at trial {trial}")]
    Cancelled { trial: usize },
    /// Reading timestamps or writing results failed
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl From<WindowError> for JpsthError {
    fn from(err: WindowError) -> JpsthError {
        JpsthError::ConfigurationRelatedError(ConfigurationError::InvalidWindow(err))
    }
}

impl JpsthError {
    /// Returns `true` if the error comes from configuration rather than data
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, JpsthError::ConfigurationRelatedError(_))
    }

    /// Returns `true` if the error comes from the spike data
    pub fn is_data_error(&self) -> bool {
        matches!(self, JpsthError::DataRelatedError(_))
    }
}
