// Epoch segmentation - fixed-size contiguous windows over the sample store
//
// Epochs are borrowed views into the SampleStore. They never overlap and,
// concatenated in order, reproduce the input exactly. Every epoch holds
// `epoch_size` samples except possibly the last one, which holds the
// remainder and is never empty.

use std::num::NonZeroUsize;
use std::ops::Range;

use super::sample::Sample;
use super::stats::EpochSummary;

/// A read-only window of consecutive samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epoch<'a> {
    index: usize,
    start: usize,
    samples: &'a [Sample],
}

impl<'a> Epoch<'a> {
    /// Position of this epoch in the segmented sequence
    pub fn index(&self) -> usize {
        self.index
    }

    /// Sample indices this epoch covers in the backing store
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.samples.len()
    }

    pub fn samples(&self) -> &'a [Sample] {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for epochs produced by the segmenter
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Per-axis mean, standard deviation and mean-vector norm
    pub fn summary(&self) -> EpochSummary {
        EpochSummary::compute(self.samples)
    }
}

/// Splits an ordered sample sequence into epochs
#[derive(Debug, Clone, Copy)]
pub struct EpochSegmenter {
    epoch_size: NonZeroUsize,
}

impl EpochSegmenter {
    pub fn new(epoch_size: NonZeroUsize) -> Self {
        Self { epoch_size }
    }

    pub fn epoch_size(&self) -> usize {
        self.epoch_size.get()
    }

    /// Lazily segment `samples` into consecutive epochs
    ///
    /// An empty input yields no epochs.
    pub fn segment<'a>(&self, samples: &'a [Sample]) -> impl Iterator<Item = Epoch<'a>> + 'a {
        let size = self.epoch_size.get();
        samples
            .chunks(size)
            .enumerate()
            .map(move |(index, chunk)| Epoch {
                index,
                start: index * size,
                samples: chunk,
            })
    }
}
