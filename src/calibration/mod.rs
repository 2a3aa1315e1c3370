// Calibration module - gravity-based accelerometer offset/gain estimation
//
// The calibration workflow:
// 1. Ingest x,y,z samples into a SampleStore
// 2. Segment the store into fixed-duration epochs
// 3. Keep epochs whose per-axis standard deviation is below the threshold
// 4. Estimate per-axis corrections from how far each retained epoch's
//    gravity magnitude deviates from the nominal constant

pub mod epoch;
pub mod estimator;
pub mod filter;
pub mod ingest;
pub mod pipeline;
pub mod report;
pub mod sample;
pub mod stats;

pub use epoch::{Epoch, EpochSegmenter};
pub use estimator::{Correction, CorrectionEstimator};
pub use filter::EpochFilter;
pub use pipeline::{calibrate_file, CalibrationPipeline};
pub use report::CalibrationReport;
pub use sample::{Axis, Sample, SampleStore};
pub use stats::EpochSummary;
