//! Peri-event analysis windows and the binning shared by every histogram built
//! from them.

use std::{fmt::{Display, Formatter}, result::Result, str::FromStr};
use ndarray::Array1;
use crate::error::{ConfigurationError, WindowError};


/// How the right edge of a window is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Offsets in `[x_min, x_max)`
    #[default]
    HalfOpen,
    /// Offsets in `[x_min, x_max]`, an offset exactly on the right edge of the
    /// last full bin is counted in that bin
    Closed,
}

impl FromStr for Boundary {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half_open" | "half-open" | "halfopen" => Ok(Boundary::HalfOpen),
            "closed" => Ok(Boundary::Closed),
            _ => Err(ConfigurationError::UnrecognizedBoundary(String::from(s))),
        }
    }
}

impl Display for Boundary {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Boundary::HalfOpen => write!(f, "half_open"),
            Boundary::Closed => write!(f, "closed"),
        }
    }
}

/// An interval of offsets around each reference event (seconds) split into bins
/// of equal width, the number of bins is `floor((x_max - x_min) / bin_size)` and
/// is shared by every matrix built under the same window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec {
    x_min: f64,
    x_max: f64,
    bin_size: f64,
    boundary: Boundary,
    bin_count: usize,
}

impl Default for WindowSpec {
    fn default() -> Self {
        WindowSpec {
            x_min: -0.2,
            x_max: 0.2,
            bin_size: 0.01,
            boundary: Boundary::HalfOpen,
            bin_count: 40,
        }
    }
}

impl WindowSpec {
    /// Creates a half-open window `[x_min, x_max)` with the given bin size (seconds),
    /// errors if the bin size is not positive, if the interval is empty or if
    /// not a single full bin fits inside the interval
    pub fn new(x_min: f64, x_max: f64, bin_size: f64) -> Result<Self, WindowError> {
        if !x_min.is_finite() || !x_max.is_finite() {
            return Err(WindowError::NonFiniteBoundary { x_min, x_max });
        }
        if !bin_size.is_finite() || bin_size <= 0. {
            return Err(WindowError::NonPositiveBinSize(bin_size));
        }
        if x_max <= x_min {
            return Err(WindowError::EmptyInterval { x_min, x_max });
        }

        let width = x_max - x_min;
        let bins = (width / bin_size).floor();
        if !bins.is_finite() || bins < 1. {
            return Err(WindowError::NoBins { width, bin_size });
        }

        Ok(WindowSpec {
            x_min,
            x_max,
            bin_size,
            boundary: Boundary::HalfOpen,
            bin_count: bins as usize,
        })
    }

    /// Returns the same window with a different right edge policy
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;

        self
    }

    /// Left boundary (seconds)
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Right boundary (seconds)
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Width of a single bin (seconds)
    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    /// Right edge policy
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Number of bins in the window
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    // end of the last full bin, equal to `x_max` when the width is a multiple of the bin size
    fn covered_end(&self) -> f64 {
        self.x_min + self.bin_count as f64 * self.bin_size
    }

    /// Returns whether an offset from a reference event lies inside the window
    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.x_min && match self.boundary {
            Boundary::HalfOpen => offset < self.x_max,
            Boundary::Closed => offset <= self.x_max,
        }
    }

    /// Returns `true` if the offset lies past the right edge of the window
    pub fn is_past(&self, offset: f64) -> bool {
        match self.boundary {
            Boundary::HalfOpen => offset >= self.x_max,
            Boundary::Closed => offset > self.x_max,
        }
    }

    /// Returns the bin an offset falls into, `None` if the offset is outside of the window
    /// or inside the partial bin left over when the width is not a multiple of the bin size
    pub fn bin_index(&self, offset: f64) -> Option<usize> {
        if !self.contains(offset) {
            return None;
        }

        let index = ((offset - self.x_min) / self.bin_size).floor() as usize;
        if index < self.bin_count {
            return Some(index);
        }

        // division rounding can push an offset just inside the last bin onto its right edge
        let end = self.covered_end();
        let on_last_bin = match self.boundary {
            Boundary::HalfOpen => offset < end,
            Boundary::Closed => offset <= end,
        };

        if on_last_bin {
            Some(self.bin_count - 1)
        } else {
            None
        }
    }

    /// Left edge of every bin, `x_min + i * bin_size`
    pub fn axis(&self) -> Array1<f64> {
        Array1::from_iter((0..self.bin_count).map(|i| self.x_min + i as f64 * self.bin_size))
    }
}
