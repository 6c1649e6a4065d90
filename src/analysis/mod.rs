//! The joint peri-stimulus time histogram (JPSTH) of two spike trains aligned to a
//! train of reference events, see Aertsen et al., "Dynamics of neuronal firing
//! correlation: modulation of effective connectivity", J. Neurophysiol. 61 (1989).
//!
//! Histograms, the per-trial joint tensor and its trial reductions are built once
//! when a [`JointPeriStimulusTimeHistogram`] is created, normalized views are
//! computed on request and are not cached.

use std::result::Result;
use ndarray::Array1;
use crate::aggregate::{aggregate, Aggregate};
use crate::error::JpsthError;
use crate::joint::{build_joint_tensor_with, JointTensor};
use crate::normalization::{variance_normalize, Normalization, NormalizedMatrix};
use crate::psth::{build_named_psth, PSTHMatrix};
use crate::settings::AnalysisSettings;
use crate::window::WindowSpec;


/// Joint histogram of a select and a bottom train around shared reference events
#[derive(Debug, Clone)]
pub struct JointPeriStimulusTimeHistogram {
    select: PSTHMatrix,
    bottom: PSTHMatrix,
    tensor: JointTensor,
    aggregate: Aggregate,
    settings: AnalysisSettings,
}

// mean subtracted histogram of a train against itself, its diagonal is the
// variance of every bin across trials
fn self_variance(psth: &PSTHMatrix, settings: &AnalysisSettings) -> Result<Array1<f64>, JpsthError> {
    let tensor = build_joint_tensor_with(psth, psth, settings)?;
    let aggregated = aggregate(&tensor)?;

    Ok(aggregated.mean_subtracted().diag().to_owned())
}

impl JointPeriStimulusTimeHistogram {
    /// Builds the joint histogram with the default settings, every train must be
    /// ascending and the reference train must not be empty
    pub fn new(
        reference: &[f64],
        select: &[f64],
        bottom: &[f64],
        window: &WindowSpec,
    ) -> Result<Self, JpsthError> {
        JointPeriStimulusTimeHistogram::with_settings(
            reference, select, bottom, window, AnalysisSettings::default()
        )
    }

    /// Builds the joint histogram with the given settings
    pub fn with_settings(
        reference: &[f64],
        select: &[f64],
        bottom: &[f64],
        window: &WindowSpec,
        settings: AnalysisSettings,
    ) -> Result<Self, JpsthError> {
        tracing::debug!(
            "building jpsth: {} reference events, {} select spikes, {} bottom spikes, window [{}, {}) by {}",
            reference.len(), select.len(), bottom.len(), window.x_min(), window.x_max(), window.bin_size(),
        );

        let (select_psth, bottom_psth) = if settings.parallel {
            let (select_psth, bottom_psth) = rayon::join(
                || build_named_psth("select", reference, select, window, &settings),
                || build_named_psth("bottom", reference, bottom, window, &settings),
            );

            (select_psth?, bottom_psth?)
        } else {
            (
                build_named_psth("select", reference, select, window, &settings)?,
                build_named_psth("bottom", reference, bottom, window, &settings)?,
            )
        };

        JointPeriStimulusTimeHistogram::from_histograms(select_psth, bottom_psth, settings)
    }

    /// Builds the joint histogram from two histograms of the same reference events,
    /// errors if their trial or bin counts differ
    pub fn from_histograms(
        select: PSTHMatrix,
        bottom: PSTHMatrix,
        settings: AnalysisSettings,
    ) -> Result<Self, JpsthError> {
        let tensor = build_joint_tensor_with(&select, &bottom, &settings)?;
        let aggregate = aggregate(&tensor)?;

        Ok(JointPeriStimulusTimeHistogram { select, bottom, tensor, aggregate, settings })
    }

    /// Histogram of the select train (columns of the joint histogram)
    pub fn select_psth(&self) -> &PSTHMatrix {
        &self.select
    }

    /// Histogram of the bottom train (rows of the joint histogram)
    pub fn bottom_psth(&self) -> &PSTHMatrix {
        &self.bottom
    }

    /// Per-trial joint counts
    pub fn tensor(&self) -> &JointTensor {
        &self.tensor
    }

    /// Trial reductions of the joint counts
    pub fn aggregate(&self) -> &Aggregate {
        &self.aggregate
    }

    /// Window every histogram was built with
    pub fn window(&self) -> &WindowSpec {
        self.select.window()
    }

    /// Number of trials
    pub fn trials(&self) -> usize {
        self.tensor.trials()
    }

    /// Left edge of every bin (seconds)
    pub fn axis(&self) -> Array1<f64> {
        self.window().axis()
    }

    /// Variance of every bin of the bottom and select trains across trials,
    /// each read from the diagonal of the train's mean subtracted histogram against itself
    pub fn self_variances(&self) -> Result<(Array1<f64>, Array1<f64>), JpsthError> {
        if self.select == self.bottom {
            // identical histograms, this joint histogram already is the self pair
            let variance = self.aggregate.mean_subtracted().diag().to_owned();

            return Ok((variance.clone(), variance));
        }

        if self.settings.parallel {
            let (bottom_variance, select_variance) = rayon::join(
                || self_variance(&self.bottom, &self.settings),
                || self_variance(&self.select, &self.settings),
            );

            Ok((bottom_variance?, select_variance?))
        } else {
            Ok((
                self_variance(&self.bottom, &self.settings)?,
                self_variance(&self.select, &self.settings)?,
            ))
        }
    }

    /// Returns the joint histogram under the given normalization
    pub fn get_processed(&self, normalization: Normalization) -> Result<NormalizedMatrix, JpsthError> {
        let processed = match normalization {
            Normalization::Raw => NormalizedMatrix::from_values(
                normalization,
                self.aggregate.sum.mapv(|count| count as f64),
                self.axis(),
            ),
            Normalization::MeanSubtracted => NormalizedMatrix::from_values(
                normalization,
                self.aggregate.mean_subtracted(),
                self.axis(),
            ),
            Normalization::VarianceNormalized => {
                let (bottom_variance, select_variance) = self.self_variances()?;

                variance_normalize(
                    &self.aggregate.mean_subtracted(),
                    &bottom_variance,
                    &select_variance,
                    self.axis(),
                )
            },
        };

        tracing::debug!(
            "processed jpsth ({}): {} degenerate cells",
            normalization, processed.degenerate().len(),
        );

        Ok(processed)
    }
}

/// Computes the joint histogram of `select` and `bottom` around `reference` under the
/// given normalization with the default settings
pub fn compute(
    reference: &[f64],
    select: &[f64],
    bottom: &[f64],
    window: &WindowSpec,
    normalization: Normalization,
) -> Result<NormalizedMatrix, JpsthError> {
    compute_with(reference, select, bottom, window, normalization, AnalysisSettings::default())
}

/// Computes the joint histogram of `select` and `bottom` around `reference` under the
/// given normalization
pub fn compute_with(
    reference: &[f64],
    select: &[f64],
    bottom: &[f64],
    window: &WindowSpec,
    normalization: Normalization,
    settings: AnalysisSettings,
) -> Result<NormalizedMatrix, JpsthError> {
    JointPeriStimulusTimeHistogram::with_settings(reference, select, bottom, window, settings)?
        .get_processed(normalization)
}
