// CorrectionEstimator - per-axis offset and gain from retained epochs
//
// Each retained epoch is weighted by how far its measured gravity magnitude
// deviates from the nominal constant g:
//
//   weight = 1 - g / |norm - g|,  clamped to at most MAX_EPOCH_WEIGHT
//
// The weight is subtracted from all six accumulators (offset d and gain a
// for X, Y, Z) once per iteration, and the totals are finally divided by
// (iterations + retained epochs). Offsets start at 0 and gains at 1; the
// accumulators are shared across epochs.
//
// The per-iteration update is identical for every axis, so the three
// corrections always come out equal. The subtraction is repeated rather
// than multiplied so the rounding matches the established calibration
// output bit for bit.

use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{debug, info};

use super::epoch::Epoch;
use super::sample::Axis;
use crate::error::{CalibrationError, EpochStage};

/// Upper bound applied to a single epoch's weight
pub const MAX_EPOCH_WEIGHT: f64 = 100.0;

/// Calibration correction for one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correction {
    pub axis: Axis,
    /// Additive offset
    #[serde(rename = "offset_d")]
    pub offset: f64,
    /// Multiplicative gain factor
    #[serde(rename = "gain_a")]
    pub gain: f64,
}

#[derive(Debug, Clone, Copy)]
struct AxisAccumulator {
    offset: f64,
    gain: f64,
}

impl Default for AxisAccumulator {
    fn default() -> Self {
        Self {
            offset: 0.0,
            gain: 1.0,
        }
    }
}

/// Weight of one epoch given its mean-vector norm
///
/// # Returns
/// * `Ok(f64)` - Weight, never above `MAX_EPOCH_WEIGHT`
/// * `Err(CalibrationError::Domain)` - The norm is not finite, equals
///   `gravity` exactly (zero division), or the weight is not finite
pub fn epoch_weight(mean_norm: f64, gravity: f64) -> Result<f64, CalibrationError> {
    if !mean_norm.is_finite() {
        return Err(CalibrationError::Domain {
            reason: format!("epoch gravity magnitude {} is not finite", mean_norm),
        });
    }

    let deviation = (mean_norm - gravity).abs();
    if deviation == 0.0 {
        return Err(CalibrationError::Domain {
            reason: format!(
                "epoch gravity magnitude {} equals nominal gravity; weight is undefined",
                mean_norm
            ),
        });
    }

    let weight = 1.0 - gravity / deviation;
    if !weight.is_finite() {
        return Err(CalibrationError::Domain {
            reason: format!(
                "epoch weight {} is not finite (norm {}, gravity {})",
                weight, mean_norm, gravity
            ),
        });
    }

    Ok(if weight >= MAX_EPOCH_WEIGHT {
        MAX_EPOCH_WEIGHT
    } else {
        weight
    })
}

/// Estimates per-axis offset/gain corrections
#[derive(Debug, Clone, Copy)]
pub struct CorrectionEstimator {
    gravity: f64,
    threshold: f64,
    iterations: NonZeroUsize,
}

impl CorrectionEstimator {
    /// Create an estimator
    ///
    /// # Arguments
    /// * `gravity` - Nominal gravitational acceleration
    /// * `threshold` - Noise threshold the epochs were filtered with
    /// * `iterations` - Update steps applied per epoch
    pub fn new(gravity: f64, threshold: f64, iterations: NonZeroUsize) -> Self {
        Self {
            gravity,
            threshold,
            iterations,
        }
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Noise threshold carried with the estimator's configuration
    ///
    /// The accumulation does not read it.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn iterations(&self) -> usize {
        self.iterations.get()
    }

    /// Estimate corrections for axes X, Y and Z, in that order
    ///
    /// # Returns
    /// * `Ok([Correction; 3])` - One correction per axis
    /// * `Err(CalibrationError::EmptyEpochSet)` - No retained epochs
    /// * `Err(CalibrationError::Domain)` - An epoch's weight is undefined
    pub fn estimate(&self, epochs: &[Epoch<'_>]) -> Result<[Correction; 3], CalibrationError> {
        if epochs.is_empty() {
            return Err(CalibrationError::EmptyEpochSet {
                stage: EpochStage::Estimation,
            });
        }

        let mut acc = [AxisAccumulator::default(); 3];

        for epoch in epochs {
            let norm = epoch.summary().mean_norm;
            let weight = epoch_weight(norm, self.gravity)?;
            debug!(
                epoch = epoch.index(),
                len = epoch.len(),
                norm,
                weight,
                "[CorrectionEstimator] epoch weighted"
            );

            for _ in 0..self.iterations.get() {
                for axis in acc.iter_mut() {
                    axis.offset -= weight;
                    axis.gain -= weight;
                }
            }
        }

        let divisor = self.iterations.get() as f64 + epochs.len() as f64;
        info!(
            "[CorrectionEstimator] Estimated corrections from {} epochs ({} iterations, threshold {})",
            epochs.len(),
            self.iterations,
            self.threshold
        );

        Ok(Axis::ALL.map(|axis| {
            let totals = acc[axis.index()];
            Correction {
                axis,
                offset: totals.offset / divisor,
                gain: totals.gain / divisor,
            }
        }))
    }
}
