//! Reduction of per-trial joint histograms across trials.

use std::result::Result;
use ndarray::{Array1, Array2, Axis};
use crate::error::DataError;
use crate::joint::JointTensor;


/// Trial reductions of a [`JointTensor`]
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// Joint counts summed across trials (raw JPSTH)
    pub sum: Array2<u64>,
    /// Joint counts averaged across trials
    pub mean: Array2<f64>,
    /// Average count of every bin of the select train
    pub mean_select: Array1<f64>,
    /// Average count of every bin of the bottom train
    pub mean_bottom: Array1<f64>,
    /// Joint histogram expected if both trains fire independently from trial to trial,
    /// `predict[u][v] = mean_bottom[u] * mean_select[v]`
    pub predict: Array2<f64>,
    /// Number of trials reduced
    pub trials: usize,
}

impl Aggregate {
    /// Average joint histogram minus the independence prediction
    pub fn mean_subtracted(&self) -> Array2<f64> {
        &self.mean - &self.predict
    }

    /// Sum of every cell of the raw JPSTH
    pub fn raw_total(&self) -> u64 {
        self.sum.sum()
    }
}

/// Reduces the tensor across trials, errors if it holds no trials
pub fn aggregate(tensor: &JointTensor) -> Result<Aggregate, DataError> {
    let trials = tensor.trials();
    if trials == 0 {
        return Err(DataError::NoTrials);
    }

    let k = trials as f64;
    let bins = tensor.bin_count();

    let sum = tensor.counts().sum_axis(Axis(0));
    let mean = sum.mapv(|total| total as f64 / k);

    let mean_select = tensor.select_totals().mapv(|total| total as f64 / k);
    let mean_bottom = tensor.bottom_totals().mapv(|total| total as f64 / k);

    let predict = Array2::from_shape_fn((bins, bins), |(u, v)| mean_bottom[u] * mean_select[v]);

    Ok(Aggregate { sum, mean, mean_select, mean_bottom, predict, trials })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JpsthError;
    use crate::joint::build_joint_tensor;
    use crate::psth::build_psth;
    use crate::window::WindowSpec;

    #[test]
    fn test_aggregate() -> Result<(), JpsthError> {
        let window = WindowSpec::new(0., 0.5, 0.25)?;
        let reference = [0., 1.];
        // select: [1, 0] and [1, 1], bottom: [0, 1] and [2, 0]
        let select = build_psth(&reference, &[0.1, 1.1, 1.3], &window)?;
        let bottom = build_psth(&reference, &[0.3, 1.05, 1.2], &window)?;

        let aggregated = aggregate(&build_joint_tensor(&select, &bottom)?)?;

        // trial 0: [[0, 0], [1, 0]], trial 1: [[2, 2], [0, 0]]
        assert_eq!(aggregated.sum, ndarray::arr2(&[[2u64, 2], [1, 0]]));
        assert_eq!(aggregated.mean, ndarray::arr2(&[[1., 1.], [0.5, 0.]]));
        assert_eq!(aggregated.mean_select.to_vec(), vec![1., 0.5]);
        assert_eq!(aggregated.mean_bottom.to_vec(), vec![1., 0.5]);
        assert_eq!(aggregated.predict, ndarray::arr2(&[[1., 0.5], [0.5, 0.25]]));
        assert_eq!(aggregated.mean_subtracted(), ndarray::arr2(&[[0., 0.5], [0., -0.25]]));
        assert_eq!(aggregated.raw_total(), 5);
        assert_eq!(aggregated.trials, 2);

        Ok(())
    }
}
