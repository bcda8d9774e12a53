//! `ix-core`: foundational types for the intersection queueing simulator.
//!
//! This crate is a dependency of every other `ix-*` crate.  It has no `ix-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ArmId`, `PhaseId`                                    |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `RandomSource`, `SimRng`, `ScriptedSource`, `ConstantSource` |
//! | [`config`]      | `RunConfig`, `ArrivalSampling`                        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ArrivalSampling, DEFAULT_SERVICE_PROBABILITY, RunConfig};
pub use error::{CoreError, CoreResult};
pub use ids::{ArmId, PhaseId};
pub use rng::{ConstantSource, RandomSource, ScriptedSource, SimRng};
pub use time::{SimClock, Tick};
