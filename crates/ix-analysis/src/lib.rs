//! `ix-analysis`: post-run derivations over a finished simulation.
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`saturation`]  | `SaturationEstimator`, `Saturation`, `MaxFlow`        |
//! | [`stats`]       | `SummaryStats`, `ReportStats`, cross-replicate stats  |
//! | [`error`]       | `AnalysisError`, `AnalysisResult<T>`                  |

pub mod error;
pub mod saturation;
pub mod stats;

#[cfg(test)]
mod tests;

pub use error::{AnalysisError, AnalysisResult};
pub use saturation::{DEFAULT_MAX_FLOW_PER_HOUR, MaxFlow, Saturation, SaturationEstimator};
pub use stats::{ReportStats, SummaryStats, across_runs};
