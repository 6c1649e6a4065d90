//! Analysis parameters read from the `[jpsth]` table of a TOML file.
//!
//! ```toml
//! [jpsth]
//! tag = "neuron04a_neuron05b"
//! reference = "data/Event04.txt"
//! select = "data/Neuron05b.txt"
//! bottom = "data/Neuron04a.txt"
//! x_min = -0.2
//! x_max = 0.2
//! bin_size = 0.05
//! normalization = "variance_normalized"
//! ```

use std::{path::PathBuf, result::Result};
use toml::{from_str, Value};
use tracing::Level;
use crate::error::{ConfigurationError, JpsthError};
use crate::normalization::Normalization;
use crate::settings::{AnalysisSettings, ScanStrategy};
use crate::window::{Boundary, WindowSpec};


fn invalid(field_name: &str, reason: &str) -> ConfigurationError {
    ConfigurationError::InvalidField {
        field: String::from(field_name),
        reason: String::from(reason),
    }
}

fn parse_bool(value: &Value, field_name: &str) -> Result<bool, ConfigurationError> {
    value
        .as_bool()
        .ok_or_else(|| invalid(field_name, "expected a boolean"))
}

// integers are accepted so `x_max = 1` reads the same as `x_max = 1.0`
fn parse_f64(value: &Value, field_name: &str) -> Result<f64, ConfigurationError> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Integer(v) => Ok(*v as f64),
        _ => Err(invalid(field_name, "expected a number")),
    }
}

fn parse_string(value: &Value, field_name: &str) -> Result<String, ConfigurationError> {
    value
        .as_str()
        .ok_or_else(|| invalid(field_name, "expected a string"))
        .map(String::from)
}

fn parse_log_level(value: &Value, field_name: &str) -> Result<Level, ConfigurationError> {
    parse_string(value, field_name)?
        .parse::<Level>()
        .map_err(|_| invalid(field_name, "expected one of trace, debug, info, warn or error"))
}

fn parse_value_with_default<T>(
    table: &Value,
    key: &str,
    parser: impl Fn(&Value, &str) -> Result<T, ConfigurationError>,
    default: T,
) -> Result<T, ConfigurationError> {
    table
        .get(key)
        .map_or(Ok(default), |value| parser(value, key))
}

fn parse_required<T>(
    table: &Value,
    key: &str,
    parser: impl Fn(&Value, &str) -> Result<T, ConfigurationError>,
) -> Result<T, ConfigurationError> {
    match table.get(key) {
        Some(value) => parser(value, key),
        None => Err(invalid(key, "missing required field")),
    }
}

/// Everything needed to run one analysis from files
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Prefix of the output files
    pub tag: String,
    /// Reference event timestamps
    pub reference: PathBuf,
    /// Select train timestamps (columns)
    pub select: PathBuf,
    /// Bottom train timestamps (rows)
    pub bottom: PathBuf,
    pub window: WindowSpec,
    pub normalization: Normalization,
    pub strategy: ScanStrategy,
    pub parallel: bool,
    /// Maximum level of the driver's log output
    pub log_level: Level,
}

impl AnalysisConfig {
    /// Reads the configuration from the `[jpsth]` table of a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, JpsthError> {
        let config: Value = from_str(content)
            .map_err(|e| invalid("toml", &e.to_string()))?;

        match config.get("jpsth") {
            Some(table) => AnalysisConfig::from_table(table),
            None => Err(invalid("jpsth", "missing [jpsth] table").into()),
        }
    }

    /// Reads the configuration from a TOML table, missing optional fields take
    /// their default values
    pub fn from_table(table: &Value) -> Result<Self, JpsthError> {
        let default_window = WindowSpec::default();

        let tag = parse_required(table, "tag", parse_string)?;
        let reference = PathBuf::from(parse_required(table, "reference", parse_string)?);
        let select = PathBuf::from(parse_required(table, "select", parse_string)?);
        let bottom = PathBuf::from(parse_required(table, "bottom", parse_string)?);

        let x_min = parse_value_with_default(table, "x_min", parse_f64, default_window.x_min())?;
        let x_max = parse_value_with_default(table, "x_max", parse_f64, default_window.x_max())?;
        let bin_size = parse_value_with_default(table, "bin_size", parse_f64, default_window.bin_size())?;
        let boundary: Boundary = parse_value_with_default(
            table, "boundary", parse_string, String::from("half_open")
        )?.parse()?;

        let window = WindowSpec::new(x_min, x_max, bin_size)?.with_boundary(boundary);

        let normalization: Normalization = parse_value_with_default(
            table, "normalization", parse_string, String::from("raw")
        )?.parse()?;
        let strategy: ScanStrategy = parse_value_with_default(
            table, "strategy", parse_string, String::from("forward_cursor")
        )?.parse()?;
        let parallel = parse_value_with_default(table, "parallel", parse_bool, false)?;
        let log_level = parse_value_with_default(table, "log_level", parse_log_level, Level::INFO)?;

        Ok(AnalysisConfig {
            tag,
            reference,
            select,
            bottom,
            window,
            normalization,
            strategy,
            parallel,
            log_level,
        })
    }

    /// Execution settings described by the configuration
    pub fn settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            strategy: self.strategy,
            parallel: self.parallel,
            cancel: None,
        }
    }
}
