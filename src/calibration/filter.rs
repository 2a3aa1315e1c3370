// Epoch filter - keeps low-motion epochs suitable for gravity calibration
//
// An epoch is retained when its standard deviation is strictly below the
// threshold on all three axes. An empty input is an error, but filtering
// every epoch out is a valid (empty) result.

use tracing::{debug, info, warn};

use super::epoch::Epoch;
use crate::error::{CalibrationError, EpochStage};

/// Noise-threshold filter over segmented epochs
#[derive(Debug, Clone, Copy)]
pub struct EpochFilter {
    threshold: f64,
}

impl EpochFilter {
    /// Create a filter with the maximum acceptable per-axis deviation
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Retain quiet epochs, preserving their order
    ///
    /// # Returns
    /// * `Ok(Vec<Epoch>)` - Retained epochs (possibly empty)
    /// * `Err(CalibrationError::EmptyEpochSet)` - No epochs were given
    pub fn apply<'a>(&self, epochs: &[Epoch<'a>]) -> Result<Vec<Epoch<'a>>, CalibrationError> {
        if epochs.is_empty() {
            return Err(CalibrationError::EmptyEpochSet {
                stage: EpochStage::Filtering,
            });
        }

        let retained: Vec<Epoch<'a>> = epochs
            .iter()
            .filter(|epoch| {
                let summary = epoch.summary();
                let keep = summary.is_quiet(self.threshold);
                debug!(
                    epoch = epoch.index(),
                    len = epoch.len(),
                    sd_x = summary.std_dev[0],
                    sd_y = summary.std_dev[1],
                    sd_z = summary.std_dev[2],
                    keep,
                    "[EpochFilter] epoch evaluated"
                );
                keep
            })
            .copied()
            .collect();

        info!(
            "[EpochFilter] Retained {} of {} epochs (threshold {})",
            retained.len(),
            epochs.len(),
            self.threshold
        );
        if retained.is_empty() {
            warn!("[EpochFilter] Every epoch exceeded the noise threshold");
        }

        Ok(retained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::epoch::EpochSegmenter;
    use crate::calibration::sample::Sample;
    use std::num::NonZeroUsize;

    /// Epochs of 4 samples whose z-axis sd equals `amplitude`
    fn samples_with_amplitudes(amplitudes: &[f64]) -> Vec<Sample> {
        amplitudes
            .iter()
            .flat_map(|&a| {
                [
                    Sample::new(0.0, 0.0, 9.81 + a),
                    Sample::new(0.0, 0.0, 9.81 - a),
                    Sample::new(0.0, 0.0, 9.81 + a),
                    Sample::new(0.0, 0.0, 9.81 - a),
                ]
            })
            .collect()
    }

    fn segment(samples: &[Sample]) -> Vec<Epoch<'_>> {
        EpochSegmenter::new(NonZeroUsize::new(4).unwrap())
            .segment(samples)
            .collect()
    }

    #[test]
    fn test_empty_input_is_error() {
        let result = EpochFilter::new(0.05).apply(&[]);
        assert_eq!(
            result.unwrap_err(),
            CalibrationError::EmptyEpochSet {
                stage: EpochStage::Filtering
            }
        );
    }

    #[test]
    fn test_retains_quiet_epochs_in_order() {
        let samples = samples_with_amplitudes(&[0.01, 0.5, 0.02, 1.0, 0.0]);
        let epochs = segment(&samples);
        let retained = EpochFilter::new(0.05).apply(&epochs).unwrap();
        let indices: Vec<usize> = retained.iter().map(Epoch::index).collect();
        assert_eq!(indices, vec![0, 2, 4]);
    }

    #[test]
    fn test_everything_filtered_is_not_error() {
        let samples = samples_with_amplitudes(&[0.5, 1.0]);
        let epochs = segment(&samples);
        let retained = EpochFilter::new(0.05).apply(&epochs).unwrap();
        assert!(retained.is_empty());
    }

    #[test]
    fn test_threshold_boundary_is_excluded() {
        // sd is exactly 0.5 for an alternating ±0.5 signal around 0
        let samples = vec![
            Sample::new(0.5, 0.0, 0.0),
            Sample::new(-0.5, 0.0, 0.0),
            Sample::new(0.5, 0.0, 0.0),
            Sample::new(-0.5, 0.0, 0.0),
        ];
        let epochs = segment(&samples);
        assert_eq!(epochs[0].summary().std_dev[0], 0.5);
        assert!(EpochFilter::new(0.5).apply(&epochs).unwrap().is_empty());
        assert_eq!(EpochFilter::new(0.5000001).apply(&epochs).unwrap().len(), 1);
    }

    #[test]
    fn test_raising_threshold_never_drops_epochs() {
        let samples = samples_with_amplitudes(&[0.01, 0.2, 0.03, 0.4, 0.07, 0.0, 0.15]);
        let epochs = segment(&samples);

        let mut previous = 0;
        for step in 1..=50 {
            let threshold = step as f64 * 0.01;
            let kept = EpochFilter::new(threshold).apply(&epochs).unwrap().len();
            assert!(
                kept >= previous,
                "threshold {} kept {} < {}",
                threshold,
                kept,
                previous
            );
            previous = kept;
        }
        assert_eq!(previous, epochs.len());
    }
}
