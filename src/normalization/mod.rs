//! Normalized views of a joint peri-stimulus time histogram.

use std::{fmt::{Display, Formatter}, io::{self, Write}, result::Result, str::FromStr};
use ndarray::{Array1, Array2, Zip};
use crate::error::ConfigurationError;


/// How the joint histogram is normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Normalization {
    /// Joint counts summed across trials
    #[default]
    Raw,
    /// Average joint counts minus the product of the average histograms, removes
    /// what independent firing rate modulation explains
    MeanSubtracted,
    /// Mean subtracted counts divided by the square root of the product of both
    /// trains' own variances in each bin, a correlation coefficient for every bin pair
    VarianceNormalized,
}

impl FromStr for Normalization {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "raw" | "rawjpsth" => Ok(Normalization::Raw),
            "mean_subtracted" | "meansubtracted" | "jpsth-pstpred" | "jpsth-psthpred" => {
                Ok(Normalization::MeanSubtracted)
            },
            "variance_normalized" | "variancenormalized" | "(jpsth-psthpred)/sdpred" | "(jpsth-pstpred)/sdpred" => {
                Ok(Normalization::VarianceNormalized)
            },
            _ => Err(ConfigurationError::UnrecognizedMode(String::from(s))),
        }
    }
}

impl Display for Normalization {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            Normalization::Raw => "raw",
            Normalization::MeanSubtracted => "mean_subtracted",
            Normalization::VarianceNormalized => "variance_normalized",
        };

        write!(f, "{}", name)
    }
}

/// A `bin_count x bin_count` joint histogram where every cell is either a value or
/// undefined (`None`), rows follow the bottom train and columns the select train
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMatrix {
    mode: Normalization,
    values: Array2<Option<f64>>,
    degenerate: Vec<(usize, usize)>,
    axis: Array1<f64>,
}

impl NormalizedMatrix {
    /// Wraps a matrix where every cell is defined
    pub fn from_values(mode: Normalization, values: Array2<f64>, axis: Array1<f64>) -> Self {
        NormalizedMatrix {
            mode,
            values: values.mapv(Some),
            degenerate: Vec::new(),
            axis,
        }
    }

    /// Normalization used to build the matrix
    pub fn mode(&self) -> Normalization {
        self.mode
    }

    /// Every cell, `None` marks an undefined cell
    pub fn values(&self) -> &Array2<Option<f64>> {
        &self.values
    }

    /// Value of cell `(u, v)`, `None` if undefined
    pub fn get(&self, u: usize, v: usize) -> Option<f64> {
        self.values[[u, v]]
    }

    /// Coordinates of undefined cells in row major order
    pub fn degenerate(&self) -> &[(usize, usize)] {
        &self.degenerate
    }

    /// Whether cell `(u, v)` is undefined
    pub fn is_degenerate(&self, u: usize, v: usize) -> bool {
        self.values[[u, v]].is_none()
    }

    /// Left edge of every bin (seconds), shared by both axes
    pub fn axis(&self) -> &Array1<f64> {
        &self.axis
    }

    /// Number of bins along each axis
    pub fn bin_count(&self) -> usize {
        self.axis.len()
    }

    /// Dense copy of the matrix with undefined cells replaced by `fill`
    pub fn to_dense(&self, fill: f64) -> Array2<f64> {
        self.values.mapv(|value| value.unwrap_or(fill))
    }

    /// Sum of every defined cell
    pub fn defined_total(&self) -> f64 {
        self.values.iter().flatten().sum()
    }

    /// Writes one comma separated line per row, undefined cells are written as `undefined`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for row in self.values.rows() {
            let line: Vec<String> = row.iter()
                .map(|value| match value {
                    Some(value) => value.to_string(),
                    None => String::from("undefined"),
                })
                .collect();

            writeln!(writer, "{}", line.join(","))?;
        }

        Ok(())
    }
}

/// Divides every cell of a mean subtracted histogram by
/// `sqrt(bottom_variance[u] * select_variance[v])`, cells whose denominator is
/// zero (no variability across trials) are left undefined
pub fn variance_normalize(
    mean_subtracted: &Array2<f64>,
    bottom_variance: &Array1<f64>,
    select_variance: &Array1<f64>,
    axis: Array1<f64>,
) -> NormalizedMatrix {
    let mut values = Array2::<Option<f64>>::from_elem(mean_subtracted.raw_dim(), None);

    Zip::indexed(&mut values)
        .and(mean_subtracted)
        .for_each(|(u, v), cell, &covariance| {
            let (bottom, select) = (bottom_variance[u], select_variance[v]);
            if bottom > 0. && select > 0. {
                let denominator = (bottom * select).sqrt();
                if denominator > 0. && denominator.is_finite() {
                    *cell = Some(covariance / denominator);
                }
            }
        });

    let degenerate: Vec<(usize, usize)> = values.indexed_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(index, _)| index)
        .collect();

    if !degenerate.is_empty() {
        tracing::debug!(
            "{} of {} cells have no variance and are undefined",
            degenerate.len(), values.len(),
        );
    }

    NormalizedMatrix {
        mode: Normalization::VarianceNormalized,
        values,
        degenerate,
        axis,
    }
}
