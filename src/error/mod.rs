// Error types for the accelerometer calibrator
//
// This module defines the error type shared by every calibration stage,
// with stable numeric codes so scripts driving the CLI can tell failures apart.

mod calibration;

pub use calibration::{log_calibration_error, CalibrationError, CalibrationErrorCodes, EpochStage};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
