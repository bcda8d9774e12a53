//! Raw per-arm samples collected during a run, and their finalised summary.

use ix_core::{ArmId, ArrivalSampling, Tick};

use crate::QueueState;

// ── MetricsAccumulator ────────────────────────────────────────────────────────

/// Raw samples for one run.  Created fresh by each `Sim` and never shared.
#[derive(Clone, Debug, Default)]
pub struct MetricsAccumulator {
    /// Completed delay samples (seconds) per arm.
    delays:    Vec<Vec<u64>>,
    /// Running max of the once-per-tick queue length sample.
    max_queue: Vec<usize>,
    served:    Vec<u64>,
    arrivals:  Vec<u64>,
}

impl MetricsAccumulator {
    pub fn new(n_arms: usize) -> Self {
        Self {
            delays:    vec![Vec::new(); n_arms],
            max_queue: vec![0; n_arms],
            served:    vec![0; n_arms],
            arrivals:  vec![0; n_arms],
        }
    }

    #[inline]
    pub fn record_arrival(&mut self, arm: ArmId) {
        if let Some(n) = self.arrivals.get_mut(arm.index()) {
            *n += 1;
        }
    }

    #[inline]
    pub fn record_departure(&mut self, arm: ArmId, delay_secs: u64) {
        let i = arm.index();
        if i < self.served.len() {
            self.delays[i].push(delay_secs);
            self.served[i] += 1;
        }
    }

    /// Fold one per-tick queue-length sample into the running maxima.
    pub fn sample_queues(&mut self, queues: &QueueState) {
        for (i, max) in self.max_queue.iter_mut().enumerate() {
            let len = queues.len(ArmId(i as u32));
            if len > *max {
                *max = len;
            }
        }
    }

    /// Summarise the raw samples.  Pure: the same samples and queue state
    /// always produce the same metrics.
    pub fn finalize(&self, queues: &QueueState) -> Vec<ArmMetrics> {
        (0..self.served.len())
            .map(|i| {
                let arm = ArmId(i as u32);
                let samples = &self.delays[i];
                ArmMetrics {
                    arm,
                    mean_delay_secs: mean(samples),
                    max_delay_secs:  samples.iter().copied().max().unwrap_or(0),
                    max_queue:       self.max_queue[i],
                    served:          self.served[i],
                    arrivals:        self.arrivals[i],
                    remaining_queue: queues.len(arm),
                }
            })
            .collect()
    }
}

/// Arithmetic mean of delay samples; 0 for an empty slice.
pub fn mean(samples: &[u64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&d| d as f64).sum::<f64>() / samples.len() as f64
}

// ── Finalised output ──────────────────────────────────────────────────────────

/// Summary for one arm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmMetrics {
    pub arm:             ArmId,
    /// Mean wait of served vehicles; 0 if none were served.
    pub mean_delay_secs: f64,
    pub max_delay_secs:  u64,
    /// Largest queue length seen at any end-of-tick sample; 0 if never non-zero.
    pub max_queue:       usize,
    pub served:          u64,
    pub arrivals:        u64,
    /// Vehicles still queued when the run ended.
    pub remaining_queue: usize,
}

/// Everything a finished run produces.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    /// One entry per arm, indexed by `ArmId`.
    pub arms:             Vec<ArmMetrics>,
    /// Final simulation time.  May exceed the horizon by up to one cycle.
    pub elapsed:          Tick,
    pub passes_completed: u64,
    pub sampling:         ArrivalSampling,
}

impl RunReport {
    /// Per-arm columns, indexed by `ArmId`.
    pub fn mean_delays(&self) -> Vec<f64> {
        self.arms.iter().map(|a| a.mean_delay_secs).collect()
    }

    pub fn max_queues(&self) -> Vec<usize> {
        self.arms.iter().map(|a| a.max_queue).collect()
    }

    pub fn served_counts(&self) -> Vec<u64> {
        self.arms.iter().map(|a| a.served).collect()
    }

    pub fn total_served(&self) -> u64 {
        self.arms.iter().map(|a| a.served).sum()
    }
}
