//! Validation of recorded spike trains and a few generators for synthetic ones.

use std::result::Result;
use rand::Rng;
use rand_distr::{Distribution, Exp, Gamma};
use crate::error::{ConfigurationError, DataError};


/// Checks that every timestamp of a train is finite and that the train is in
/// ascending (non-strict) order, `train` names the train in the returned error
pub fn check_ascending(train: &'static str, timestamps: &[f64]) -> Result<(), DataError> {
    for (index, value) in timestamps.iter().enumerate() {
        if !value.is_finite() {
            return Err(DataError::NonFiniteTimestamp { train, index });
        }
    }

    match timestamps.windows(2).position(|pair| pair[1] < pair[0]) {
        Some(position) => Err(DataError::NotAscending {
            train,
            index: position + 1,
            previous: timestamps[position],
            current: timestamps[position + 1],
        }),
        None => Ok(()),
    }
}

/// Checks a reference event train, it must be non-empty as well as ascending
pub fn check_reference(timestamps: &[f64]) -> Result<(), DataError> {
    if timestamps.is_empty() {
        return Err(DataError::EmptyReference);
    }

    check_ascending("reference", timestamps)
}

/// Generates the spike times (seconds) of a homogeneous Poisson process firing at
/// `rate` (Hz) from `0` up to `duration` (seconds), both must be finite and
/// non-negative
pub fn poisson_spike_train<R: Rng + ?Sized>(
    rate: f64,
    duration: f64,
    rng: &mut R,
) -> Result<Vec<f64>, ConfigurationError> {
    if !rate.is_finite() || rate < 0. {
        return Err(ConfigurationError::InvalidField {
            field: String::from("rate"),
            reason: format!("must be finite and non-negative, got {}", rate),
        });
    }
    if !duration.is_finite() || duration < 0. {
        return Err(ConfigurationError::InvalidField {
            field: String::from("duration"),
            reason: format!("must be finite and non-negative, got {}", duration),
        });
    }

    if rate == 0. {
        return Ok(Vec::new());
    }

    let intervals = Exp::new(rate).map_err(|e| ConfigurationError::InvalidField {
        field: String::from("rate"),
        reason: e.to_string(),
    })?;

    let mut spikes = Vec::new();
    let mut time = intervals.sample(rng);
    while time < duration {
        spikes.push(time);
        time += intervals.sample(rng);
    }

    Ok(spikes)
}

/// Generates `count` spike times whose inter-spike intervals follow a gamma
/// distribution with the given shape and scale (seconds), a shape of `1.` gives a
/// Poisson process while larger shapes give more regular firing
pub fn gamma_spike_train<R: Rng + ?Sized>(
    shape: f64,
    scale: f64,
    count: usize,
    rng: &mut R,
) -> Result<Vec<f64>, ConfigurationError> {
    let intervals = Gamma::new(shape, scale).map_err(|e| ConfigurationError::InvalidField {
        field: String::from("shape/scale"),
        reason: e.to_string(),
    })?;

    let mut time = 0.;

    Ok(
        (0..count)
            .map(|_| {
                time += intervals.sample(rng);
                time
            })
            .collect()
    )
}
