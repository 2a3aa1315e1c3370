//! Configuration management for calibration runs
//!
//! Sensor properties (sample rate, epoch duration, nominal gravity) can be
//! loaded from a JSON file so different capture devices can be processed
//! without recompilation. Run parameters (input path, noise threshold,
//! iteration count) come from the command line and are validated here
//! before any data is read.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;

/// Default capture rate of the accelerometer in Hz
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 30;
/// Default epoch length in seconds
pub const DEFAULT_EPOCH_DURATION_SECS: u32 = 10;
/// Default nominal gravitational acceleration (m/s²)
pub const DEFAULT_GRAVITY: f64 = 9.81;
/// Default number of estimator iterations
pub const DEFAULT_ITERATIONS: i64 = 1000;

/// Properties of the capture device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Samples per second in the capture file
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hz: u32,
    /// Duration of one epoch in seconds
    #[serde(default = "default_epoch_duration")]
    pub epoch_duration_secs: u32,
    /// Expected magnitude of the gravity vector at rest
    #[serde(default = "default_gravity")]
    pub gravity: f64,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE_HZ
}

fn default_epoch_duration() -> u32 {
    DEFAULT_EPOCH_DURATION_SECS
}

fn default_gravity() -> f64 {
    DEFAULT_GRAVITY
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            epoch_duration_secs: DEFAULT_EPOCH_DURATION_SECS,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl SensorConfig {
    /// Load sensor configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or the defaults if the file doesn't exist
    /// or the JSON is invalid.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded sensor configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Number of samples in one full epoch
    pub fn epoch_size(&self) -> usize {
        self.sample_rate_hz as usize * self.epoch_duration_secs as usize
    }

    /// Check that the sensor description can drive a calibration run
    pub fn validate(&self) -> Result<NonZeroUsize, CalibrationError> {
        let epoch_size =
            NonZeroUsize::new(self.epoch_size()).ok_or(CalibrationError::InvalidSampleRate {
                sample_rate_hz: self.sample_rate_hz,
                epoch_duration_secs: self.epoch_duration_secs,
            })?;

        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(CalibrationError::InvalidGravity {
                gravity: self.gravity,
            });
        }

        Ok(epoch_size)
    }
}

/// Raw, unvalidated parameters of one calibration run
#[derive(Debug, Clone)]
pub struct CalibrationConfig {
    /// CSV capture to process
    pub input: Option<PathBuf>,
    /// Maximum per-axis standard deviation for an epoch to be retained
    pub threshold: f64,
    /// Estimator iteration count
    pub iterations: i64,
    /// Whether the first CSV row is a header
    pub has_headers: bool,
    pub sensor: SensorConfig,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            input: None,
            threshold: 0.0,
            iterations: DEFAULT_ITERATIONS,
            has_headers: false,
            sensor: SensorConfig::default(),
        }
    }
}

/// Run parameters that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub input: PathBuf,
    pub threshold: f64,
    pub iterations: NonZeroUsize,
    pub has_headers: bool,
    pub epoch_size: NonZeroUsize,
    pub gravity: f64,
}

impl CalibrationConfig {
    /// Validate run parameters
    ///
    /// Checks run in a fixed order (input, threshold, iterations, sensor)
    /// and never touch the filesystem, so a bad flag is reported before
    /// ingestion starts.
    ///
    /// # Returns
    /// * `Ok(ValidatedConfig)` - Typed parameters ready for the pipeline
    /// * `Err(CalibrationError)` - First violated constraint
    pub fn validate(&self) -> Result<ValidatedConfig, CalibrationError> {
        let input = match &self.input {
            Some(path) if !path.as_os_str().is_empty() => path.clone(),
            _ => return Err(CalibrationError::MissingInput),
        };

        if self.threshold.is_nan() || self.threshold <= 0.0 {
            return Err(CalibrationError::InvalidThreshold {
                threshold: self.threshold,
            });
        }

        let iterations = usize::try_from(self.iterations)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(CalibrationError::InvalidIterationCount {
                iterations: self.iterations,
            })?;

        let epoch_size = self.sensor.validate()?;

        Ok(ValidatedConfig {
            input,
            threshold: self.threshold,
            iterations,
            has_headers: self.has_headers,
            epoch_size,
            gravity: self.sensor.gravity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> CalibrationConfig {
        CalibrationConfig {
            input: Some(PathBuf::from("capture.csv")),
            threshold: 0.05,
            ..CalibrationConfig::default()
        }
    }

    #[test]
    fn test_default_sensor_config() {
        let config = SensorConfig::default();
        assert_eq!(config.sample_rate_hz, 30);
        assert_eq!(config.epoch_duration_secs, 10);
        assert_eq!(config.gravity, 9.81);
        assert_eq!(config.epoch_size(), 300);
    }

    #[test]
    fn test_partial_json_uses_field_defaults() {
        let config: SensorConfig = serde_json::from_str(r#"{ "sample_rate_hz": 50 }"#).unwrap();
        assert_eq!(config.sample_rate_hz, 50);
        assert_eq!(config.epoch_duration_secs, 10);
        assert_eq!(config.gravity, 9.81);
        assert_eq!(config.epoch_size(), 500);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = SensorConfig::load_from_file("/nonexistent/sensor.json");
        assert_eq!(config, SensorConfig::default());
    }

    #[test]
    fn test_validate_accepts_valid_config() {
        let validated = valid_config().validate().unwrap();
        assert_eq!(validated.input, PathBuf::from("capture.csv"));
        assert_eq!(validated.iterations.get(), 1000);
        assert_eq!(validated.epoch_size.get(), 300);
        assert_eq!(validated.gravity, 9.81);
    }

    #[test]
    fn test_validate_missing_input() {
        let config = CalibrationConfig {
            input: None,
            ..valid_config()
        };
        assert_eq!(config.validate().unwrap_err(), CalibrationError::MissingInput);

        let config = CalibrationConfig {
            input: Some(PathBuf::new()),
            ..valid_config()
        };
        assert_eq!(config.validate().unwrap_err(), CalibrationError::MissingInput);
    }

    #[test]
    fn test_validate_rejects_non_positive_threshold() {
        for threshold in [0.0, -1.0, f64::NAN] {
            let config = CalibrationConfig {
                threshold,
                ..valid_config()
            };
            match config.validate().unwrap_err() {
                CalibrationError::InvalidThreshold { .. } => {}
                other => panic!("Expected InvalidThreshold, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_iterations() {
        for iterations in [0, -5] {
            let config = CalibrationConfig {
                iterations,
                ..valid_config()
            };
            assert_eq!(
                config.validate().unwrap_err(),
                CalibrationError::InvalidIterationCount { iterations }
            );
        }
    }

    #[test]
    fn test_validate_checks_input_before_threshold() {
        let config = CalibrationConfig {
            input: None,
            threshold: 0.0,
            ..valid_config()
        };
        assert_eq!(config.validate().unwrap_err(), CalibrationError::MissingInput);
    }

    #[test]
    fn test_validate_rejects_zero_epoch_size() {
        let config = CalibrationConfig {
            sensor: SensorConfig {
                sample_rate_hz: 0,
                ..SensorConfig::default()
            },
            ..valid_config()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            CalibrationError::InvalidSampleRate {
                sample_rate_hz: 0,
                epoch_duration_secs: 10
            }
        );
    }

    #[test]
    fn test_validate_rejects_bad_gravity() {
        let config = CalibrationConfig {
            sensor: SensorConfig {
                gravity: 0.0,
                ..SensorConfig::default()
            },
            ..valid_config()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            CalibrationError::InvalidGravity { gravity: 0.0 }
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SensorConfig {
            sample_rate_hz: 100,
            epoch_duration_secs: 5,
            gravity: 9.80665,
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: SensorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
