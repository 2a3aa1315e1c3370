// Sample types - raw tri-axial acceleration readings
//
// A SampleStore owns every reading of a run. Later stages only borrow
// slices of it, so the store must outlive the epochs built on top of it.

use serde::{Deserialize, Serialize};

/// Accelerometer axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in reporting order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Single-character label used in reports
    pub fn label(&self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }

    /// Position of this axis in `[x, y, z]` arrays
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One accelerometer reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Reading on a single axis
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Ordered, read-only backing sequence of samples for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStore {
    samples: Vec<Sample>,
}

impl SampleStore {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }
}

impl From<Vec<Sample>> for SampleStore {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<Sample> for SampleStore {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
