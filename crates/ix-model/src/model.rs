//! The `IntersectionModel` and its read-only derivations.

use ix_core::ArmId;

use crate::{ModelError, ModelResult, Phase};

/// Arm count plus an ordered phase list.
///
/// Pure data: the model carries no per-run state and may be reused (or have
/// its green times rewritten) between runs.  Two phases may serve the same
/// arm; the engine simply serves it in both.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionModel {
    pub n_arms: usize,
    pub phases: Vec<Phase>,
}

impl IntersectionModel {
    pub fn new(n_arms: usize, phases: Vec<Phase>) -> Self {
        Self { n_arms, phases }
    }

    /// Iterate all arm IDs in ascending order.
    pub fn arms(&self) -> impl Iterator<Item = ArmId> + '_ {
        (0..self.n_arms as u32).map(ArmId)
    }

    /// Length of one full phase pass in seconds.
    pub fn total_cycle_seconds(&self) -> u64 {
        self.phases.iter().map(|p| p.green_time as u64).sum()
    }

    /// Total green seconds per cycle allotted to `arm`.  Zero is valid.
    pub fn arm_green_seconds(&self, arm: ArmId) -> u64 {
        self.phases
            .iter()
            .filter(|p| p.serves(arm))
            .map(|p| p.green_time as u64)
            .sum()
    }

    /// [`arm_green_seconds`][Self::arm_green_seconds] for every arm, indexed
    /// by `ArmId`.
    pub fn green_allocation(&self) -> Vec<u64> {
        self.arms().map(|arm| self.arm_green_seconds(arm)).collect()
    }

    /// Re-derive every phase's green time from a cycle length and one
    /// percentage per phase: `green = round(cycle_secs × pct / 100)`.
    ///
    /// Percentages need not sum to 100.  On error the model is unchanged.
    pub fn apply_split(&mut self, cycle_secs: u32, percentages: &[f64]) -> ModelResult<()> {
        if percentages.len() != self.phases.len() {
            return Err(ModelError::SplitCountMismatch {
                expected: self.phases.len(),
                got:      percentages.len(),
            });
        }
        if let Some(&bad) = percentages.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(ModelError::InvalidSplit(bad));
        }
        for (phase, &pct) in self.phases.iter_mut().zip(percentages) {
            phase.green_time = (cycle_secs as f64 * pct / 100.0).round() as u32;
        }
        Ok(())
    }
}
