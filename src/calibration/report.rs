// CalibrationReport - result of one calibration run and its renderers

use serde::Serialize;

use super::estimator::Correction;

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationReport {
    pub source: String,
    pub sample_count: usize,
    pub epoch_count: usize,
    pub retained_epoch_count: usize,
    pub threshold: f64,
    pub iterations: usize,
    pub corrections: [Correction; 3],
}

impl CalibrationReport {
    /// One line per axis with six-decimal offset and gain
    pub fn render_table(&self) -> String {
        self.corrections
            .iter()
            .map(|c| {
                format!(
                    "Axis: {}\tOffset d: {:.6}\tGain factor a: {:.6}\n",
                    c.axis.label(),
                    c.offset,
                    c.gain
                )
            })
            .collect()
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
