//! Assembly-wide legend ranges and per-bearing history.
//!
//! The legend range is rebuilt from every bearing's stats each frame and is
//! never persisted. History is the only state that survives between frames:
//! one bounded FIFO per bearing per field, fed with that bearing's own
//! extrema for external charting.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluator::DESIGN_RPM;
use crate::field::{BearingStats, FieldType};

/// Maximum samples kept per history buffer.
pub const HISTORY_CAPACITY: usize = 200;

/// Fixed lower bound of the temperature legend.
const AMBIENT_TEMPERATURE: f64 = 40.0;

/// `[min, max]` window used to normalize the selected field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendRange {
    pub min: f64,
    pub max: f64,
}

impl LegendRange {
    /// Builds the legend range of `field` from all bearings' stats.
    ///
    /// Pressure starts at 0 and temperature at 40; thickness spans from the
    /// thinnest film to a speed-dependent ceiling so the legend does not
    /// collapse at low speed. With no bearings the data-driven bound is 0.
    /// The result always satisfies `max > min`.
    pub fn aggregate(stats: &[BearingStats], field: FieldType, rpm: f64) -> Self {
        let max_of = |f: fn(&BearingStats) -> f64| stats.iter().map(f).fold(0.0, f64::max);
        let range = match field {
            FieldType::Pressure => LegendRange {
                min: 0.0,
                max: max_of(|s| s.max_pressure),
            },
            FieldType::Thickness => {
                let min = stats
                    .iter()
                    .map(|s| s.min_thickness)
                    .reduce(f64::min)
                    .unwrap_or(0.0);
                LegendRange {
                    min,
                    max: (50.0 + (rpm / DESIGN_RPM) * 40.0).max(55.0),
                }
            }
            FieldType::Temperature => LegendRange {
                min: AMBIENT_TEMPERATURE,
                max: max_of(|s| s.max_temperature),
            },
        };
        range.widened()
    }

    /// Forces a non-empty range: if `max <= min` (or either bound is not
    /// finite), `max` becomes `min + 1`.
    pub fn widened(self) -> Self {
        let min = if self.min.is_finite() { self.min } else { 0.0 };
        if self.max.is_finite() && self.max > min {
            LegendRange { min, max: self.max }
        } else {
            LegendRange { min, max: min + 1.0 }
        }
    }
}

/// One timestamped history sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub time: f64,
    pub value: f64,
}

/// Bounded FIFO of samples; the oldest is dropped once full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryBuffer {
    samples: VecDeque<HistorySample>,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }
}

impl HistoryBuffer {
    /// Appends a sample, evicting the oldest one beyond [`HISTORY_CAPACITY`].
    pub fn push(&mut self, time: f64, value: f64) {
        self.samples.push_back(HistorySample { time, value });
        while self.samples.len() > HISTORY_CAPACITY {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<HistorySample> {
        self.samples.back().copied()
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistorySample> {
        self.samples.iter()
    }
}

/// History of one bearing: a buffer per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BearingHistory {
    pub pressure: HistoryBuffer,
    pub thickness: HistoryBuffer,
    pub temperature: HistoryBuffer,
}

impl BearingHistory {
    /// Appends this bearing's stats for one frame.
    pub fn record(&mut self, time: f64, stats: &BearingStats) {
        self.pressure.push(time, stats.max_pressure);
        self.thickness.push(time, stats.min_thickness);
        self.temperature.push(time, stats.max_temperature);
    }

    /// The buffer for `field`.
    pub fn get(&self, field: FieldType) -> &HistoryBuffer {
        match field {
            FieldType::Pressure => &self.pressure,
            FieldType::Thickness => &self.thickness,
            FieldType::Temperature => &self.temperature,
        }
    }
}

/// Histories of all bearings in an assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    bearings: Vec<BearingHistory>,
}

impl HistoryLog {
    /// Appends one frame of stats. When the number of bearings differs from
    /// the previous record, every buffer is reset first.
    pub fn record(&mut self, time: f64, stats: &[BearingStats]) {
        if self.bearings.len() != stats.len() {
            debug!(
                from = self.bearings.len(),
                to = stats.len(),
                "bearing count changed, resetting history"
            );
            self.reset(stats.len());
        }
        for (history, s) in self.bearings.iter_mut().zip(stats) {
            history.record(time, s);
        }
    }

    /// Replaces all buffers with `count` empty ones.
    pub fn reset(&mut self, count: usize) {
        self.bearings = vec![BearingHistory::default(); count];
    }

    /// Number of bearings tracked.
    pub fn len(&self) -> usize {
        self.bearings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bearings.is_empty()
    }

    /// History of bearing `index`.
    pub fn bearing(&self, index: usize) -> Option<&BearingHistory> {
        self.bearings.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BearingHistory> {
        self.bearings.iter()
    }
}
