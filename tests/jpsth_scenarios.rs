#[cfg(test)]
mod tests {
    use jpsth::{
        analysis::JointPeriStimulusTimeHistogram,
        compute,
        error::{ConfigurationError, DataError, JpsthError},
        normalization::Normalization,
        psth::build_psth,
        settings::AnalysisSettings,
        window::WindowSpec,
    };


    #[test]
    pub fn test_identical_trains_fill_one_diagonal_cell() -> Result<(), JpsthError> {
        let reference = [0., 1., 2.];
        let train = [0.01, 1.02, 2.03];
        let window = WindowSpec::new(-0.05, 0.05, 0.05)?;

        let jpsth = JointPeriStimulusTimeHistogram::new(&reference, &train, &train, &window)?;

        for k in 0..3 {
            assert_eq!(jpsth.select_psth().trial(k).to_vec(), vec![0, 1]);
            assert_eq!(jpsth.bottom_psth().trial(k).to_vec(), vec![0, 1]);
        }

        let raw = jpsth.get_processed(Normalization::Raw)?;

        assert_eq!(raw.bin_count(), 2);
        assert_eq!(raw.get(1, 1), Some(3.));
        assert_eq!(raw.get(0, 0), Some(0.));
        assert_eq!(raw.get(0, 1), Some(0.));
        assert_eq!(raw.get(1, 0), Some(0.));
        assert!(raw.degenerate().is_empty());

        // identical counts in every trial, nothing is left after subtracting the prediction
        let mean_subtracted = jpsth.get_processed(Normalization::MeanSubtracted)?;
        assert_eq!(mean_subtracted.defined_total(), 0.);

        Ok(())
    }

    #[test]
    pub fn test_silent_train_is_fully_undefined() -> Result<(), JpsthError> {
        let reference = [0., 1., 2.];
        let select = [0.01, 1.02, 1.04, 2.03];
        // every bottom spike falls outside of the trial windows
        let bottom = [0.5, 1.5, 2.5];
        let window = WindowSpec::new(-0.1, 0.1, 0.05)?;

        let jpsth = JointPeriStimulusTimeHistogram::new(&reference, &select, &bottom, &window)?;

        assert_eq!(jpsth.bottom_psth().total(), 0);
        assert_eq!(jpsth.aggregate().raw_total(), 0);

        let raw = jpsth.get_processed(Normalization::Raw)?;
        assert!(raw.values().iter().all(|value| *value == Some(0.)));

        let normalized = jpsth.get_processed(Normalization::VarianceNormalized)?;
        assert_eq!(normalized.degenerate().len(), 16);
        assert!(normalized.values().iter().all(|value| value.is_none()));

        Ok(())
    }

    #[test]
    pub fn test_mismatched_bin_counts_are_rejected() -> Result<(), JpsthError> {
        let reference = [0., 1.];
        let select = build_psth(&reference, &[0.1, 1.1], &WindowSpec::new(0., 0.75, 0.25)?)?;
        let bottom = build_psth(&reference, &[0.1, 1.1], &WindowSpec::new(0., 1., 0.25)?)?;

        let result = JointPeriStimulusTimeHistogram::from_histograms(select, bottom, AnalysisSettings::default());

        assert!(matches!(
            result,
            Err(JpsthError::ConfigurationRelatedError(
                ConfigurationError::BinCountMismatch { select: 3, bottom: 4 }
            ))
        ));

        Ok(())
    }

    #[test]
    pub fn test_invalid_trains_are_rejected() -> Result<(), JpsthError> {
        let window = WindowSpec::new(-0.05, 0.05, 0.05)?;

        let empty_reference = compute(&[], &[0.1], &[0.1], &window, Normalization::Raw);
        assert!(matches!(
            empty_reference,
            Err(JpsthError::DataRelatedError(DataError::EmptyReference))
        ));

        let unsorted_bottom = compute(&[0., 1.], &[0.01], &[0.02, 0.01], &window, Normalization::Raw);
        assert!(matches!(
            unsorted_bottom,
            Err(JpsthError::DataRelatedError(DataError::NotAscending { train: "bottom", index: 1, .. }))
        ));

        let unsorted_reference = compute(&[1., 0.], &[0.01], &[0.01], &window, Normalization::Raw);
        assert!(matches!(
            unsorted_reference,
            Err(JpsthError::DataRelatedError(DataError::NotAscending { train: "reference", .. }))
        ));

        let not_finite = compute(&[0.], &[f64::NAN], &[0.01], &window, Normalization::Raw);
        assert!(matches!(
            not_finite,
            Err(JpsthError::DataRelatedError(DataError::NonFiniteTimestamp { train: "select", index: 0 }))
        ));

        Ok(())
    }

    #[test]
    pub fn test_oversized_window_fails_before_building() -> Result<(), JpsthError> {
        let window = WindowSpec::new(0., 1e7, 1.)?;
        let result = compute(&[0.], &[0.5], &[0.5], &window, Normalization::Raw);

        assert!(matches!(
            result,
            Err(JpsthError::ConfigurationRelatedError(
                ConfigurationError::TooLarge { trials: 1, bins: 10_000_000 }
            ))
        ));

        Ok(())
    }

    #[test]
    pub fn test_empty_target_trains_are_allowed() -> Result<(), JpsthError> {
        let window = WindowSpec::new(-0.05, 0.05, 0.05)?;
        let raw = compute(&[0., 1.], &[], &[], &window, Normalization::Raw)?;

        assert_eq!(raw.defined_total(), 0.);
        assert!(raw.degenerate().is_empty());

        Ok(())
    }

    #[test]
    pub fn test_select_and_bottom_orientation() -> Result<(), JpsthError> {
        let window = WindowSpec::new(0., 0.5, 0.25)?;
        // select always fires early, bottom always fires late
        let reference = [0., 1.];
        let select = [0.1, 1.1];
        let bottom = [0.3, 1.3];

        let raw = compute(&reference, &select, &bottom, &window, Normalization::Raw)?;

        // rows follow the bottom train, columns the select train
        assert_eq!(raw.get(1, 0), Some(2.));
        assert_eq!(raw.get(0, 1), Some(0.));

        Ok(())
    }
}
