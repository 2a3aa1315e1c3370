// Epoch statistics - per-axis mean, population standard deviation and
// the Euclidean norm of the mean vector.
//
// Formulas (n = sample count):
// - mean_axis = Σ sample.axis / n
// - sd_axis   = sqrt(Σ (sample.axis - mean_axis)² / n)   (population, divisor n)
// - norm      = sqrt(mean_x² + mean_y² + mean_z²)

use super::sample::{Axis, Sample};

/// Derived statistics for one epoch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochSummary {
    /// Per-axis arithmetic mean, indexed by `Axis::index`
    pub mean: [f64; 3],
    /// Per-axis population standard deviation
    pub std_dev: [f64; 3],
    /// Euclidean norm of the mean vector (measured gravity magnitude)
    pub mean_norm: f64,
}

impl EpochSummary {
    /// Compute the summary of a non-empty sample slice
    ///
    /// The segmenter never produces empty epochs; an empty slice yields NaN
    /// components.
    pub fn compute(samples: &[Sample]) -> Self {
        let mean = mean(samples);
        let std_dev = std_dev(samples, &mean);
        Self {
            mean,
            std_dev,
            mean_norm: euclidean_norm(&mean),
        }
    }

    pub fn mean_of(&self, axis: Axis) -> f64 {
        self.mean[axis.index()]
    }

    pub fn std_dev_of(&self, axis: Axis) -> f64 {
        self.std_dev[axis.index()]
    }

    /// True when every axis deviates strictly less than `threshold`
    pub fn is_quiet(&self, threshold: f64) -> bool {
        self.std_dev.iter().all(|&sd| sd < threshold)
    }
}

fn mean(samples: &[Sample]) -> [f64; 3] {
    let n = samples.len() as f64;
    let mut sum = [0.0; 3];
    for sample in samples {
        for (acc, value) in sum.iter_mut().zip(sample.as_array()) {
            *acc += value;
        }
    }
    sum.map(|s| s / n)
}

fn std_dev(samples: &[Sample], mean: &[f64; 3]) -> [f64; 3] {
    let n = samples.len() as f64;
    let mut squares = [0.0; 3];
    for sample in samples {
        for ((acc, value), m) in squares.iter_mut().zip(sample.as_array()).zip(mean) {
            *acc += (value - m).powi(2);
        }
    }
    squares.map(|s| (s / n).sqrt())
}

fn euclidean_norm(v: &[f64; 3]) -> f64 {
    v.iter().map(|c| c * c).sum::<f64>().sqrt()
}
