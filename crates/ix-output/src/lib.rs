//! `ix-output`: simulation output writers.
//!
//! Two backends are provided, the second behind a Cargo feature:
//!
//! | Feature   | Backend     | Files created                                               |
//! |-----------|-------------|-------------------------------------------------------------|
//! | *(none)*  | CSV         | `events.csv`, `queue_snapshots.csv`, `arm_summaries.csv`    |
//! | `sqlite`  | SQLite      | `output.db`                                                 |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ix_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ix_output::{CsvWriter, SimOutputObserver, summary_rows};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! let report = sim.run(&mut obs)?;
//! let rows = summary_rows(&model, &config, &report, &saturation);
//! obs.finish(&rows)?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ArmSummaryRow, EventKind, EventRow, QueueSnapshotRow, summary_rows};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
