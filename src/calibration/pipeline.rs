// CalibrationPipeline - segmentation, filtering and estimation in one pass
//
// The pipeline only sees samples in and a report out. Reading the CSV and
// printing the report are left to the caller.

use tracing::info;

use super::epoch::{Epoch, EpochSegmenter};
use super::estimator::CorrectionEstimator;
use super::filter::EpochFilter;
use super::ingest;
use super::report::CalibrationReport;
use super::sample::SampleStore;
use crate::config::ValidatedConfig;
use crate::error::CalibrationError;

/// The three calibration stages configured for one run
#[derive(Debug, Clone, Copy)]
pub struct CalibrationPipeline {
    segmenter: EpochSegmenter,
    filter: EpochFilter,
    estimator: CorrectionEstimator,
}

impl CalibrationPipeline {
    pub fn new(config: &ValidatedConfig) -> Self {
        Self {
            segmenter: EpochSegmenter::new(config.epoch_size),
            filter: EpochFilter::new(config.threshold),
            estimator: CorrectionEstimator::new(
                config.gravity,
                config.threshold,
                config.iterations,
            ),
        }
    }

    /// Run every stage over `store`
    ///
    /// # Returns
    /// * `Ok(CalibrationReport)` - Corrections plus per-stage counts
    /// * `Err(CalibrationError::EmptyEpochSet)` - The store was empty
    ///   (filtering stage) or no epoch survived filtering (estimation stage)
    /// * `Err(CalibrationError::Domain)` - An epoch's weight is undefined
    pub fn run(
        &self,
        store: &SampleStore,
        source: &str,
    ) -> Result<CalibrationReport, CalibrationError> {
        let epochs: Vec<Epoch<'_>> = self.segmenter.segment(store.as_slice()).collect();
        info!(
            "[Pipeline] Segmented {} samples into {} epochs of up to {}",
            store.len(),
            epochs.len(),
            self.segmenter.epoch_size()
        );

        let retained = self.filter.apply(&epochs)?;
        let corrections = self.estimator.estimate(&retained)?;

        Ok(CalibrationReport {
            source: source.to_string(),
            sample_count: store.len(),
            epoch_count: epochs.len(),
            retained_epoch_count: retained.len(),
            threshold: self.filter.threshold(),
            iterations: self.estimator.iterations(),
            corrections,
        })
    }
}

/// Validate, ingest and calibrate a capture file described by `config`
pub fn calibrate_file(config: &ValidatedConfig) -> Result<CalibrationReport, CalibrationError> {
    let store = ingest::load_samples(&config.input, config.has_headers)?;
    CalibrationPipeline::new(config).run(&store, &config.input.display().to_string())
}
