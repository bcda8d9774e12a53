//! Per-arm degree of saturation from green-time allocation and demand.
//!
//! ```text
//! effective_capacity = max_flow × (arm_green_secs / cycle_secs)
//! saturation         = demand / effective_capacity
//! ```
//!
//! An arm with no effective capacity (no green, a zero cycle, or a zero
//! maximum flow) is reported as [`Saturation::Unserved`] rather than an
//! infinite ratio.  [`Saturation::ratio`] maps it to 0.

use ix_model::IntersectionModel;

use crate::{AnalysisError, AnalysisResult};

/// Saturation flow used when none is configured (veh/h while continuously
/// green).
pub const DEFAULT_MAX_FLOW_PER_HOUR: f64 = 1_800.0;

/// Saturation flow while green, shared or per arm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaxFlow {
    Shared(f64),
    PerArm(Vec<f64>),
}

impl MaxFlow {
    fn for_arm(&self, arm: usize) -> f64 {
        match self {
            MaxFlow::Shared(f) => *f,
            MaxFlow::PerArm(v) => v.get(arm).copied().unwrap_or(0.0),
        }
    }
}

/// Degree of saturation for one arm.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Saturation {
    /// Demand over effective capacity.  ≥ 1 means the allotted green cannot
    /// clear the demand.
    Ratio(f64),
    /// The arm has no effective capacity at all.
    Unserved,
}

impl Saturation {
    /// The ratio, with `Unserved` reported as 0.
    pub fn ratio(self) -> f64 {
        match self {
            Saturation::Ratio(r) => r,
            Saturation::Unserved => 0.0,
        }
    }

    pub fn is_unserved(self) -> bool {
        matches!(self, Saturation::Unserved)
    }

    pub fn is_oversaturated(self) -> bool {
        matches!(self, Saturation::Ratio(r) if r >= 1.0)
    }
}

/// Saturation for a single arm.
pub fn saturation(demand_per_hour: f64, green_secs: u64, cycle_secs: u64, max_flow_per_hour: f64) -> Saturation {
    if green_secs == 0 || cycle_secs == 0 {
        return Saturation::Unserved;
    }
    let capacity = max_flow_per_hour * (green_secs as f64 / cycle_secs as f64);
    if capacity <= 0.0 {
        return Saturation::Unserved;
    }
    Saturation::Ratio(demand_per_hour / capacity)
}

/// Applies [`saturation`] to every arm of a model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaturationEstimator {
    pub max_flow: MaxFlow,
}

impl Default for SaturationEstimator {
    fn default() -> Self {
        Self::shared(DEFAULT_MAX_FLOW_PER_HOUR)
    }
}

impl SaturationEstimator {
    pub fn shared(max_flow_per_hour: f64) -> Self {
        Self { max_flow: MaxFlow::Shared(max_flow_per_hour) }
    }

    pub fn per_arm(max_flow_per_hour: Vec<f64>) -> Self {
        Self { max_flow: MaxFlow::PerArm(max_flow_per_hour) }
    }

    /// One `Saturation` per arm, indexed by `ArmId`.
    ///
    /// `demand_per_hour` (and a per-arm `MaxFlow`) must have one entry per
    /// arm of `model`.
    pub fn estimate(&self, model: &IntersectionModel, demand_per_hour: &[f64]) -> AnalysisResult<Vec<Saturation>> {
        if demand_per_hour.len() != model.n_arms {
            return Err(AnalysisError::ArmCountMismatch {
                expected: model.n_arms,
                got:      demand_per_hour.len(),
                what:     "demand rates",
            });
        }
        if let MaxFlow::PerArm(v) = &self.max_flow {
            if v.len() != model.n_arms {
                return Err(AnalysisError::ArmCountMismatch {
                    expected: model.n_arms,
                    got:      v.len(),
                    what:     "max flow rates",
                });
            }
        }

        let cycle = model.total_cycle_seconds();
        Ok(model
            .arms()
            .zip(demand_per_hour)
            .map(|(arm, &demand)| {
                saturation(
                    demand,
                    model.arm_green_seconds(arm),
                    cycle,
                    self.max_flow.for_arm(arm.index()),
                )
            })
            .collect())
    }
}
