// Accelerometer Calibrator Core
// Offline per-axis offset/gain estimation from resting accelerometer captures

// Module declarations
pub mod calibration;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use calibration::{Axis, CalibrationReport, Correction, Sample, SampleStore};
pub use config::{CalibrationConfig, SensorConfig, ValidatedConfig};
pub use error::{CalibrationError, ErrorCode};

use tracing::Level;

/// Map a `-v` count to a log level (WARN by default)
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the stderr log subscriber
///
/// Safe to call more than once; later calls leave the first subscriber
/// in place.
pub fn init_logging(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for_verbosity(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
