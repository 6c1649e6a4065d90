//! Per-trial joint histograms of two trains recorded around the same reference events.

use std::result::Result;
use ndarray::{parallel::prelude::*, Array1, Array3, ArrayView2, ArrayViewMut2, Axis};
use crate::error::{ConfigurationError, JpsthError};
use crate::psth::{zeroed_counts, PSTHMatrix};
use crate::settings::AnalysisSettings;
use crate::window::WindowSpec;


/// Outer products of the bottom and select histograms of every trial stored in a
/// single arena shaped `(trials, bin_count, bin_count)`, cell `[k, u, v]` is
/// `bottom[k][u] * select[k][v]`
#[derive(Debug, Clone, PartialEq)]
pub struct JointTensor {
    counts: Array3<u64>,
    select_totals: Array1<u64>,
    bottom_totals: Array1<u64>,
    window: WindowSpec,
}

impl JointTensor {
    /// Per-trial joint counts shaped `(trials, bin_count, bin_count)`
    pub fn counts(&self) -> &Array3<u64> {
        &self.counts
    }

    /// Joint counts of a single trial, rows follow the bottom train and columns the select train
    pub fn trial(&self, k: usize) -> ArrayView2<u64> {
        self.counts.index_axis(Axis(0), k)
    }

    /// Number of trials
    pub fn trials(&self) -> usize {
        self.counts.len_of(Axis(0))
    }

    /// Number of bins along each axis
    pub fn bin_count(&self) -> usize {
        self.counts.len_of(Axis(1))
    }

    /// Select train counts of every bin summed across trials
    pub fn select_totals(&self) -> &Array1<u64> {
        &self.select_totals
    }

    /// Bottom train counts of every bin summed across trials
    pub fn bottom_totals(&self) -> &Array1<u64> {
        &self.bottom_totals
    }

    /// Window shared by both histograms
    pub fn window(&self) -> &WindowSpec {
        &self.window
    }
}

fn check_dimensions(select: &PSTHMatrix, bottom: &PSTHMatrix) -> Result<(), ConfigurationError> {
    if select.trials() != bottom.trials() {
        return Err(ConfigurationError::TrialCountMismatch {
            select: select.trials(),
            bottom: bottom.trials(),
        });
    }
    if select.bin_count() != bottom.bin_count() {
        return Err(ConfigurationError::BinCountMismatch {
            select: select.bin_count(),
            bottom: bottom.bin_count(),
        });
    }

    Ok(())
}

/// Combines two histograms built from the same reference events, errors before
/// allocating anything if the trial or bin counts differ
pub fn build_joint_tensor(select: &PSTHMatrix, bottom: &PSTHMatrix) -> Result<JointTensor, JpsthError> {
    build_joint_tensor_with(select, bottom, &AnalysisSettings::default())
}

/// Combines two histograms built from the same reference events, trials are
/// filled in parallel when `settings.parallel` is set
pub fn build_joint_tensor_with(
    select: &PSTHMatrix,
    bottom: &PSTHMatrix,
    settings: &AnalysisSettings,
) -> Result<JointTensor, JpsthError> {
    check_dimensions(select, bottom)?;

    if select.window() != bottom.window() {
        tracing::warn!(
            "combining histograms built with different windows ({:?} and {:?})",
            select.window(), bottom.window(),
        );
    }

    let (trials, bins) = (select.trials(), select.bin_count());
    let cells_per_trial = bins.checked_mul(bins)
        .ok_or(ConfigurationError::TooLarge { trials, bins })?;
    let mut counts = Array3::from_shape_vec(
        (trials, bins, bins),
        zeroed_counts::<u64>(trials, bins, cells_per_trial)?,
    ).map_err(|_| ConfigurationError::TooLarge { trials, bins })?;

    let fill_trial = |(k, mut trial): (usize, ArrayViewMut2<u64>)| -> Result<(), JpsthError> {
        settings.check_cancelled(k)?;

        let select_row = select.trial(k);
        for (&bottom_count, mut row) in bottom.trial(k).iter().zip(trial.rows_mut()) {
            if bottom_count == 0 {
                continue;
            }
            row.zip_mut_with(&select_row, |cell, &select_count| {
                *cell = bottom_count as u64 * select_count as u64;
            });
        }

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

    tracing::trace!("built joint tensor: {} trials, {}x{} bins", trials, bins, bins);

    Ok(JointTensor {
        counts,
        select_totals: select.summed(),
        bottom_totals: bottom.summed(),
        window: *select.window(),
    })
}
