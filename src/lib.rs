//! # JPSTH
//!
//! `jpsth` is a package focused on quantifying the temporal correlation between
//! two spike trains recorded around the same reference events with the joint
//! peri-stimulus time histogram. Each reference event defines a trial, the spikes of
//! each train are counted in time bins relative to the event (the PSTH), the
//! per-trial histograms of both trains are multiplied into a joint histogram and the
//! joint histograms are reduced across trials.
//!
//! Three views of the joint histogram are available:
//!
//! - [`Normalization::Raw`]: joint counts summed across trials
//! - [`Normalization::MeanSubtracted`]: average joint counts minus the prediction
//! made from the average histograms of both trains, what remains cannot be explained by
//! independent modulation of the firing rates
//! - [`Normalization::VarianceNormalized`]: mean subtracted counts divided by the
//! standard deviations of both trains in each bin, a correlation coefficient for every
//! pair of bins, bins without any variability across trials are left undefined
//!
//! ## Example Code
//!
//! ### Correlation of two trains around a stimulus
//!
//! ```rust
//! use jpsth::{
//!     error::JpsthError,
//!     analysis::JointPeriStimulusTimeHistogram,
//!     normalization::Normalization,
//!     window::WindowSpec,
//! };
//!
//! fn main() -> Result<(), JpsthError> {
//!     // stimulus onsets (seconds)
//!     let reference = [1., 2., 3., 4.];
//!     // both neurons respond 10 to 20 ms after the stimulus
//!     let select = [1.012, 2.015, 2.3, 3.011, 4.018];
//!     let bottom = [0.7, 1.014, 2.011, 3.019, 3.5, 4.013];
//!
//!     // 10 ms bins from 50 ms before to 50 ms after every stimulus
//!     let window = WindowSpec::new(-0.05, 0.05, 0.01)?;
//!
//!     let jpsth = JointPeriStimulusTimeHistogram::new(&reference, &select, &bottom, &window)?;
//!
//!     let raw = jpsth.get_processed(Normalization::Raw)?;
//!     assert_eq!(raw.bin_count(), 10);
//!     assert_eq!(raw.defined_total(), 4.);
//!
//!     // every trial has one spike of each train in the same bin pair so there is no
//!     // variability left to correlate
//!     let normalized = jpsth.get_processed(Normalization::VarianceNormalized)?;
//!     assert_eq!(normalized.degenerate().len(), 100);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Running trials in parallel
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use jpsth::{
//!     error::JpsthError,
//!     analysis::compute_with,
//!     normalization::Normalization,
//!     settings::{AnalysisSettings, ScanStrategy},
//!     spike_train::poisson_spike_train,
//!     window::WindowSpec,
//! };
//!
//! fn main() -> Result<(), JpsthError> {
//!     let mut rng = StdRng::seed_from_u64(1);
//!     let reference: Vec<f64> = (1..100).map(|i| i as f64).collect();
//!     let select = poisson_spike_train(20., 100., &mut rng)?;
//!     let bottom = poisson_spike_train(30., 100., &mut rng)?;
//!
//!     let settings = AnalysisSettings {
//!         strategy: ScanStrategy::BinarySearch,
//!         parallel: true,
//!         ..Default::default()
//!     };
//!
//!     let normalized = compute_with(
//!         &reference,
//!         &select,
//!         &bottom,
//!         &WindowSpec::default(),
//!         Normalization::VarianceNormalized,
//!         settings,
//!     )?;
//!
//!     for value in normalized.values().iter().flatten() {
//!         assert!(value.is_finite());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod window;
pub mod settings;
pub mod spike_train;
pub mod source;
pub mod psth;
pub mod joint;
pub mod aggregate;
pub mod normalization;
pub mod analysis;
pub mod config;

pub use analysis::{compute, compute_with, JointPeriStimulusTimeHistogram};
pub use normalization::{Normalization, NormalizedMatrix};
pub use window::{Boundary, WindowSpec};
