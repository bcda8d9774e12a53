//! Caller-side validation.
//!
//! The engine never validates or clamps its inputs.  Everything that would
//! make a run meaningless is rejected here, before a `Sim` is built.

use ix_core::{ArmId, PhaseId, RunConfig};

use crate::{IntersectionModel, ModelError, ModelResult};

impl IntersectionModel {
    /// Check the static model: at least one arm, at least one phase, every
    /// served arm in range, and a non-zero cycle.
    pub fn validate(&self) -> ModelResult<()> {
        if self.n_arms == 0 {
            return Err(ModelError::NoArms);
        }
        if self.phases.is_empty() {
            return Err(ModelError::NoPhases);
        }
        for (i, phase) in self.phases.iter().enumerate() {
            if let Some(&arm) = phase.arms_active.iter().find(|a| a.index() >= self.n_arms) {
                return Err(ModelError::ArmOutOfRange {
                    phase:  PhaseId(i as u32),
                    arm,
                    n_arms: self.n_arms,
                });
            }
        }
        if self.total_cycle_seconds() == 0 {
            return Err(ModelError::ZeroCycle);
        }
        Ok(())
    }
}

/// Validate a model together with the run configuration that will drive it.
pub fn validate_run(model: &IntersectionModel, config: &RunConfig) -> ModelResult<()> {
    model.validate()?;

    let rates = &config.arrival_rates_per_hour;
    if rates.len() != model.n_arms {
        return Err(ModelError::RateCountMismatch {
            expected: model.n_arms,
            got:      rates.len(),
        });
    }
    for (i, &rate) in rates.iter().enumerate() {
        if !rate.is_finite() || rate < 0.0 {
            return Err(ModelError::InvalidRate { arm: ArmId(i as u32), rate });
        }
    }

    let p = config.service_probability;
    if !(0.0..=1.0).contains(&p) {
        return Err(ModelError::InvalidServiceProbability(p));
    }
    Ok(())
}
