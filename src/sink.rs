use alloc::collections::VecDeque;
use core::time::Duration;

use log::{debug, warn};

use crate::contract;
use crate::error::Error;
use crate::sample::TextureSample;
use crate::time::MediaTimeStamp;

/// Consumer of the samples a media player produces.
pub trait TextureSampleSink {
    type Sample: TextureSample;
    type Error: core::error::Error;

    /// Accept the next sample in presentation order.
    fn receive(&mut self, sample: Self::Sample) -> Result<(), Self::Error>;
}

/// Configuration for a [`SampleQueue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Samples held at most; the oldest is dropped to make room.
    pub max_samples: usize,
    /// Reject samples that fail [`contract::validate`].
    pub validate: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            max_samples: 4,
            validate: true,
        }
    }
}

/// Sink that queues samples in arrival order.
///
/// Non-cacheable samples are only ever kept while they are the newest:
/// receiving another sample discards them.
#[derive(Debug)]
pub struct SampleQueue<S> {
    config: SinkConfig,
    samples: VecDeque<S>,
}

impl<S: TextureSample> SampleQueue<S> {
    pub fn new(config: SinkConfig) -> Self {
        let capacity = config.max_samples;
        Self {
            config,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest queued sample.
    pub fn peek(&self) -> Option<&S> {
        self.samples.front()
    }

    pub fn pop(&mut self) -> Option<S> {
        self.samples.pop_front()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.samples.iter()
    }

    /// The sample to display at `time`, if any.
    ///
    /// That is the latest sample starting at or before `time` whose duration
    /// has not run out. A zero duration lasts until the next sample starts.
    /// Timestamps compare by sequence index first, so a sample from an earlier
    /// loop or seek never covers a time in a later one.
    pub fn sample_for_time(&self, time: MediaTimeStamp) -> Option<&S> {
        let index = self
            .samples
            .iter()
            .rposition(|sample| sample.time() <= time)?;
        let sample = &self.samples[index];
        match end_time(sample, self.samples.get(index + 1)) {
            Some(end) if end <= time => None,
            _ => Some(sample),
        }
    }

    /// Drop samples no longer valid at `time`. Returns how many were dropped.
    pub fn retire_before(&mut self, time: MediaTimeStamp) -> usize {
        let before = self.samples.len();
        let mut kept = VecDeque::with_capacity(before);
        while let Some(sample) = self.samples.pop_front() {
            if end_time(&sample, self.samples.front()).is_some_and(|end| end <= time) {
                continue;
            }
            kept.push_back(sample);
        }
        self.samples = kept;
        let retired = before - self.samples.len();
        if retired > 0 {
            debug!("retired {retired} sample(s) before {time:?}");
        }
        retired
    }
}

/// Where `sample` stops being valid, `None` while it is open ended.
///
/// A zero duration sample runs until `next` starts, or until the start of the
/// next pass when `next` belongs to a later sequence.
fn end_time<S: TextureSample>(sample: &S, next: Option<&S>) -> Option<MediaTimeStamp> {
    let start = sample.time();
    if sample.duration().is_zero() {
        return next.map(|next| {
            let next = next.time();
            if next.sequence_index > start.sequence_index {
                MediaTimeStamp::with_sequence_index(Duration::ZERO, next.sequence_index)
            } else {
                next
            }
        });
    }
    Some(MediaTimeStamp {
        time: start.time.saturating_add(sample.duration()),
        ..start
    })
}

impl<S: TextureSample> Default for SampleQueue<S> {
    fn default() -> Self {
        Self::new(SinkConfig::default())
    }
}

impl<S: TextureSample> TextureSampleSink for SampleQueue<S> {
    type Sample = S;
    type Error = Error;

    fn receive(&mut self, sample: S) -> Result<(), Error> {
        if self.config.validate {
            if let Err(e) = contract::validate(&sample) {
                warn!("rejecting {} sample at {:?}: {e}", sample.format(), sample.time());
                return Err(e);
            }
        }

        let before = self.samples.len();
        self.samples.retain(|queued| queued.is_cacheable());
        let discarded = before - self.samples.len();
        if discarded > 0 {
            debug!("discarded {discarded} non-cacheable sample(s)");
        }

        if self.config.max_samples == 0 {
            warn!("sample queue has no capacity, dropping sample");
            return Ok(());
        }
        while self.samples.len() >= self.config.max_samples {
            if let Some(oldest) = self.samples.pop_front() {
                warn!("sample queue full, dropping sample at {:?}", oldest.time());
            }
        }
        self.samples.push_back(sample);
        Ok(())
    }
}
