//! `ix-model`: static description of a signalised intersection.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`phase`]      | `Phase`: name, green seconds, served arm set              |
//! | [`model`]      | `IntersectionModel`: arm count + ordered phase list       |
//! | [`validate`]   | Caller-side validation of a model and its `RunConfig`     |
//! | [`presets`]    | `plus`, `tee`, `star` layouts                             |
//! | [`error`]      | `ModelError`, `ModelResult<T>`                            |
//!
//! # Cycle model (summary)
//!
//! One cycle is a single traversal of the phase list:
//!
//! ```text
//! cycle_secs      = Σ phase.green_time
//! arm_green(arm)  = Σ phase.green_time  where arm ∈ phase.arms_active
//! ```
//!
//! The model itself never validates; an arm with zero green is legal and
//! simply never discharges.  Call [`IntersectionModel::validate`] (or
//! [`validate::validate_run`]) before handing the model to the engine.

pub mod error;
pub mod model;
pub mod phase;
pub mod presets;
pub mod validate;


pub use error::{ModelError, ModelResult};
pub use model::IntersectionModel;
pub use phase::Phase;
pub use validate::validate_run;
