//! Per-arm FIFO queues of arrival timestamps.

use std::collections::VecDeque;

use ix_core::{ArmId, Tick};

/// One FIFO of arrival ticks per arm.
///
/// Arrivals are appended with the current tick and the engine's clock never
/// goes backwards, so each queue is sorted oldest-first.  Operations on an
/// arm outside `0..n_arms` are no-ops.
#[derive(Clone, Debug, Default)]
pub struct QueueState {
    queues: Vec<VecDeque<Tick>>,
}

impl QueueState {
    pub fn new(n_arms: usize) -> Self {
        Self { queues: vec![VecDeque::new(); n_arms] }
    }

    /// Append a vehicle that arrived at `at`.  Returns `false` if `arm` is
    /// out of range.
    pub fn push(&mut self, arm: ArmId, at: Tick) -> bool {
        match self.queues.get_mut(arm.index()) {
            Some(q) => {
                q.push_back(at);
                true
            }
            None => false,
        }
    }

    /// Remove and return the oldest arrival tick on `arm`.
    pub fn pop_oldest(&mut self, arm: ArmId) -> Option<Tick> {
        self.queues.get_mut(arm.index())?.pop_front()
    }

    pub fn len(&self, arm: ArmId) -> usize {
        self.queues.get(arm.index()).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self, arm: ArmId) -> bool {
        self.len(arm) == 0
    }

    /// Write current lengths into `buf` without allocating.
    pub fn fill_lengths(&self, buf: &mut Vec<usize>) {
        buf.clear();
        buf.extend(self.queues.iter().map(VecDeque::len));
    }
}
