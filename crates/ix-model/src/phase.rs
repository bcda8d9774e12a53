//! Signal phases.

use std::collections::BTreeSet;

use ix_core::ArmId;

/// One interval of the signal plan during which a fixed set of arms is green.
///
/// `arms_active` is a `BTreeSet` so iteration is always in ascending arm
/// order; the engine relies on that for a deterministic draw sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phase {
    /// Display label only.
    pub name: String,

    /// Green duration in whole seconds.  May be rewritten between runs by
    /// [`IntersectionModel::apply_split`][crate::IntersectionModel::apply_split].
    pub green_time: u32,

    pub arms_active: BTreeSet<ArmId>,
}

impl Phase {
    pub fn new(name: impl Into<String>, green_time: u32, arms: impl IntoIterator<Item = u32>) -> Self {
        Self {
            name: name.into(),
            green_time,
            arms_active: arms.into_iter().map(ArmId).collect(),
        }
    }

    /// `true` if `arm` is green during this phase.
    #[inline]
    pub fn serves(&self, arm: ArmId) -> bool {
        self.arms_active.contains(&arm)
    }
}
