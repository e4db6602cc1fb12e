use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;

/// Rolling window of recent frame costs.
#[derive(Debug, Clone)]
pub struct FrameHistory {
    samples: VecDeque<Sample>,
    capacity: usize,
    total_frames: u64,
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    cost: Duration,
    drawn: usize,
}

/// Aggregates over the samples currently in a [`FrameHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameStats {
    pub frames: u64,
    pub window: usize,
    pub average_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub average_drawn: f64,
}

impl FrameHistory {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            total_frames: 0,
        }
    }

    /// Record one frame's wall-clock cost and draw count, evicting the oldest
    /// sample when full.
    pub fn record(&mut self, cost: Duration, drawn: usize) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { cost, drawn });
        self.total_frames += 1;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.samples.iter().map(|s| s.cost).sum();
        total / self.samples.len() as u32
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().map(|s| s.cost).min().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().map(|s| s.cost).max().unwrap_or_default()
    }

    pub fn stats(&self) -> FrameStats {
        let average_drawn = if self.samples.is_empty() {
            0.0
        } else {
            self.samples.iter().map(|s| s.drawn as f64).sum::<f64>() / self.samples.len() as f64
        };
        FrameStats {
            frames: self.total_frames,
            window: self.samples.len(),
            average_ms: self.average().as_secs_f64() * 1000.0,
            min_ms: self.min().as_secs_f64() * 1000.0,
            max_ms: self.max().as_secs_f64() * 1000.0,
            average_drawn,
        }
    }
}
