//! Ready-made intersection layouts.
//!
//! Plain data construction only; callers are free to edit the returned
//! model (e.g. with `apply_split`) before running it.

use crate::{IntersectionModel, Phase};

/// "+" crossing: opposing arms paired into two orthogonal phases.
///
/// `n_arms` is normally 4.  Phases always reference arms 0–3, so a smaller
/// `n_arms` produces a model that fails validation.
pub fn plus(n_arms: usize) -> IntersectionModel {
    IntersectionModel::new(
        n_arms,
        vec![
            Phase::new("North-South", 30, [0, 2]),
            Phase::new("East-West", 30, [1, 3]),
        ],
    )
}

/// "T" junction: main road (arms 0 and 1) then the side road (arm 2).
pub fn tee() -> IntersectionModel {
    IntersectionModel::new(
        3,
        vec![
            Phase::new("Main", 35, [0, 1]),
            Phase::new("Side", 25, [2]),
        ],
    )
}

/// Five-arm star: each arm gets its own 15 s phase.
pub fn star() -> IntersectionModel {
    IntersectionModel::new(
        5,
        vec![
            Phase::new("North", 15, [0]),
            Phase::new("East", 15, [1]),
            Phase::new("South", 15, [2]),
            Phase::new("West", 15, [3]),
            Phase::new("Centre", 15, [4]),
        ],
    )
}

/// Look up a preset by its CLI name (`plus`, `tee`, `star`).
pub fn by_name(name: &str) -> Option<IntersectionModel> {
    match name {
        "plus" | "+" | "x" => Some(plus(4)),
        "tee" | "t" => Some(tee()),
        "star" => Some(star()),
        _ => None,
    }
}
