// Calibration error types and constants

use crate::error::ErrorCode;
use std::fmt;
use tracing::error;

/// Calibration error code constants
///
/// Single source of truth for the numeric codes reported alongside
/// each error kind.
///
/// Error code range: 2001-2008
pub struct CalibrationErrorCodes {}

impl CalibrationErrorCodes {
    /// No input source identifier was provided
    pub const MISSING_INPUT: i32 = 2001;

    /// Noise threshold is not a positive number
    pub const INVALID_THRESHOLD: i32 = 2002;

    /// Iteration count is not a positive integer
    pub const INVALID_ITERATION_COUNT: i32 = 2003;

    /// Source data could not be read or decoded
    pub const INGESTION: i32 = 2004;

    /// A stage received zero epochs where at least one is required
    pub const EMPTY_EPOCH_SET: i32 = 2005;

    /// Numeric domain violation during estimation
    pub const DOMAIN: i32 = 2006;

    /// Sample rate and epoch duration yield an empty epoch
    pub const INVALID_SAMPLE_RATE: i32 = 2007;

    /// Nominal gravity is not a finite positive number
    pub const INVALID_GRAVITY: i32 = 2008;
}

/// Pipeline stage that ran out of epochs
///
/// Segmentation is absent: an empty capture segments into zero epochs
/// without error and is reported by the filtering stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochStage {
    Filtering,
    Estimation,
}

impl EpochStage {
    /// Get human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            EpochStage::Filtering => "filtering",
            EpochStage::Estimation => "estimation",
        }
    }
}

/// Log a calibration error with structured context
///
/// Emits the error code, the failing stage context and the message as
/// structured fields so the operator can see which stage aborted the run.
pub fn log_calibration_error(err: &CalibrationError, context: &str) {
    error!(
        code = err.code(),
        context,
        "Calibration error in {}: {}",
        context,
        err.message()
    );
}

/// Calibration-related errors
///
/// Every variant is fatal: a run either completes or aborts at the
/// stage that detected the problem.
///
/// Error code ranges: 2001-2008
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// No input source identifier was given
    MissingInput,

    /// Noise threshold must be > 0
    InvalidThreshold { threshold: f64 },

    /// Iteration count must be > 0
    InvalidIterationCount { iterations: i64 },

    /// Unreadable or malformed source data
    Ingestion { source: String, reason: String },

    /// A stage received zero epochs
    EmptyEpochSet { stage: EpochStage },

    /// Numeric domain violation (e.g. zero division in the epoch weight)
    Domain { reason: String },

    /// Sample rate and epoch duration produce a zero-length epoch
    InvalidSampleRate {
        sample_rate_hz: u32,
        epoch_duration_secs: u32,
    },

    /// Nominal gravity is not finite or not positive
    InvalidGravity { gravity: f64 },
}

impl ErrorCode for CalibrationError {
    fn code(&self) -> i32 {
        match self {
            CalibrationError::MissingInput => CalibrationErrorCodes::MISSING_INPUT,
            CalibrationError::InvalidThreshold { .. } => CalibrationErrorCodes::INVALID_THRESHOLD,
            CalibrationError::InvalidIterationCount { .. } => {
                CalibrationErrorCodes::INVALID_ITERATION_COUNT
            }
            CalibrationError::Ingestion { .. } => CalibrationErrorCodes::INGESTION,
            CalibrationError::EmptyEpochSet { .. } => CalibrationErrorCodes::EMPTY_EPOCH_SET,
            CalibrationError::Domain { .. } => CalibrationErrorCodes::DOMAIN,
            CalibrationError::InvalidSampleRate { .. } => {
                CalibrationErrorCodes::INVALID_SAMPLE_RATE
            }
            CalibrationError::InvalidGravity { .. } => CalibrationErrorCodes::INVALID_GRAVITY,
        }
    }

    fn message(&self) -> String {
        match self {
            CalibrationError::MissingInput => "Input file path was not provided".to_string(),
            CalibrationError::InvalidThreshold { threshold } => {
                format!(
                    "Threshold must be a positive floating point number (got {})",
                    threshold
                )
            }
            CalibrationError::InvalidIterationCount { iterations } => {
                format!(
                    "The number of iterations must be greater than zero (got {})",
                    iterations
                )
            }
            CalibrationError::Ingestion { source, reason } => {
                format!("Unable to ingest {}: {}", source, reason)
            }
            CalibrationError::EmptyEpochSet { stage } => {
                format!("No epochs available for {}", stage.display_name())
            }
            CalibrationError::Domain { reason } => format!("Domain error: {}", reason),
            CalibrationError::InvalidSampleRate {
                sample_rate_hz,
                epoch_duration_secs,
            } => {
                format!(
                    "Sample rate {} Hz over {} s yields an empty epoch",
                    sample_rate_hz, epoch_duration_secs
                )
            }
            CalibrationError::InvalidGravity { gravity } => {
                format!("Gravity must be a finite positive number (got {})", gravity)
            }
        }
    }
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibrationError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for CalibrationError {}
