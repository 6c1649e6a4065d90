//! Peri-stimulus time histograms, one row of spike counts per reference event.

use std::{mem::size_of, result::Result};
use ndarray::{parallel::prelude::*, Array1, Array2, ArrayView1, ArrayViewMut1, Axis};
use crate::error::{ConfigurationError, DataError, JpsthError};
use crate::settings::{AnalysisSettings, ScanStrategy};
use crate::spike_train::{check_ascending, check_reference};
use crate::window::WindowSpec;


/// Spike counts of a target train around every reference event, shaped
/// `(trials, bin_count)`, row `k` holds the counts for reference event `k`
#[derive(Debug, Clone, PartialEq)]
pub struct PSTHMatrix {
    counts: Array2<u32>,
    window: WindowSpec,
}

impl PSTHMatrix {
    /// Counts shaped `(trials, bin_count)`
    pub fn counts(&self) -> &Array2<u32> {
        &self.counts
    }

    /// Window the histogram was built with
    pub fn window(&self) -> &WindowSpec {
        &self.window
    }

    /// Number of trials (reference events)
    pub fn trials(&self) -> usize {
        self.counts.nrows()
    }

    /// Number of bins per trial
    pub fn bin_count(&self) -> usize {
        self.counts.ncols()
    }

    /// Counts of a single trial
    pub fn trial(&self, k: usize) -> ArrayView1<u32> {
        self.counts.row(k)
    }

    /// Counts of every bin summed across trials
    pub fn summed(&self) -> Array1<u64> {
        self.counts.mapv(|count| count as u64).sum_axis(Axis(0))
    }

    /// Average count of every bin across trials
    pub fn mean(&self) -> Result<Array1<f64>, DataError> {
        if self.trials() == 0 {
            return Err(DataError::NoTrials);
        }

        let trials = self.trials() as f64;

        Ok(self.summed().mapv(|total| total as f64 / trials))
    }

    /// Total number of counted spikes
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|count| *count as u64).sum()
    }
}

/// Zero filled buffer of `trials * cells_per_trial` counts, errors with
/// [`ConfigurationError::TooLarge`] when the size overflows or the allocation fails
/// rather than aborting
pub(crate) fn zeroed_counts<T: Clone + Default>(
    trials: usize,
    bins: usize,
    cells_per_trial: usize,
) -> Result<Vec<T>, ConfigurationError> {
    let too_large = || ConfigurationError::TooLarge { trials, bins };

    let len = trials.checked_mul(cells_per_trial).ok_or_else(too_large)?;
    if len > isize::MAX as usize / size_of::<T>().max(1) {
        return Err(too_large());
    }

    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| too_large())?;
    buffer.resize(len, T::default());

    Ok(buffer)
}

// counts every spike of `candidates` that falls inside the window around `event`,
// `candidates` must start at or before the first spike of the window
fn count_trial(row: &mut ArrayViewMut1<u32>, event: f64, candidates: &[f64], window: &WindowSpec) {
    for &spike in candidates {
        let offset = spike - event;
        if window.is_past(offset) {
            break;
        }
        if let Some(bin) = window.bin_index(offset) {
            row[bin] += 1;
        }
    }
}

/// Builds the histogram of `target` around every event of `reference` with the
/// default settings (forward cursor, single thread)
pub fn build_psth(reference: &[f64], target: &[f64], window: &WindowSpec) -> Result<PSTHMatrix, JpsthError> {
    build_psth_with(reference, target, window, &AnalysisSettings::default())
}

/// Builds the histogram of `target` around every event of `reference`, both trains
/// must be ascending and the reference train must not be empty
pub fn build_psth_with(
    reference: &[f64],
    target: &[f64],
    window: &WindowSpec,
    settings: &AnalysisSettings,
) -> Result<PSTHMatrix, JpsthError> {
    build_named_psth("target", reference, target, window, settings)
}

pub(crate) fn build_named_psth(
    train: &'static str,
    reference: &[f64],
    target: &[f64],
    window: &WindowSpec,
    settings: &AnalysisSettings,
) -> Result<PSTHMatrix, JpsthError> {
    check_reference(reference)?;
    check_ascending(train, target)?;

    let (trials, bins) = (reference.len(), window.bin_count());
    let mut counts = Array2::from_shape_vec((trials, bins), zeroed_counts::<u32>(trials, bins, bins)?)
        .map_err(|_| ConfigurationError::TooLarge { trials, bins })?;

    match settings.strategy {
        ScanStrategy::ForwardCursor => {
            // reference events are ascending so every later window starts at or
            // after the current one, spikes skipped here never belong to a later trial
            let mut cursor = 0;
            for (k, (&event, mut row)) in reference.iter().zip(counts.rows_mut()).enumerate() {
                settings.check_cancelled(k)?;

                while cursor < target.len() && target[cursor] - event < window.x_min() {
                    cursor += 1;
                }

                count_trial(&mut row, event, &target[cursor..], window);
            }
        },
        ScanStrategy::BinarySearch => {
            let fill_trial = |(k, mut row): (usize, ArrayViewMut1<u32>)| -> Result<(), JpsthError> {
                settings.check_cancelled(k)?;

                let event = reference[k];
                let start = target.partition_point(|&spike| spike - event < window.x_min());
                count_trial(&mut row, event, &target[start..], window);

                Ok(())
            };

            if settings.parallel {
                counts.axis_iter_mut(Axis(0))
                    .into_par_iter()
                    .enumerate()
                    .try_for_each(fill_trial)?;
            } else {
                counts.axis_iter_mut(Axis(0))
                    .enumerate()
                    .try_for_each(fill_trial)?;
            }
        },
    }

    tracing::debug!(
        "built {} psth: {} trials, {} bins, strategy {}",
        train, reference.len(), window.bin_count(), settings.strategy,
    );

    Ok(PSTHMatrix { counts, window: *window })
}
