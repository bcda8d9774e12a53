//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `events.csv`
//! - `queue_snapshots.csv`
//! - `arm_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ArmSummaryRow, EventRow, OutputResult, QueueSnapshotRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the output directory if needed, open the three CSV files in
    /// `dir`, and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["tick", "kind", "arm", "delay_secs"])?;

        let mut snapshots = Writer::from_path(dir.join("queue_snapshots.csv"))?;
        snapshots.write_record(["tick", "arm", "queue_len"])?;

        let mut summaries = Writer::from_path(dir.join("arm_summaries.csv"))?;
        summaries.write_record([
            "arm",
            "arrival_rate_per_hour",
            "green_secs",
            "mean_delay_secs",
            "max_delay_secs",
            "max_queue",
            "served",
            "arrivals",
            "remaining_queue",
            "saturation",
        ])?;

        Ok(Self { events, snapshots, summaries, finished: false })
    }
}

/// Empty field for missing optional values.
fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.kind.to_string(),
                row.arm.to_string(),
                opt(row.delay_secs),
            ])?;
        }
        Ok(())
    }

    fn write_queue_snapshot(&mut self, rows: &[QueueSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.arm.to_string(),
                row.queue_len.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_arm_summaries(&mut self, rows: &[ArmSummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.summaries.write_record(&[
                row.arm.to_string(),
                row.arrival_rate_per_hour.to_string(),
                row.green_secs.to_string(),
                row.mean_delay_secs.to_string(),
                row.max_delay_secs.to_string(),
                row.max_queue.to_string(),
                row.served.to_string(),
                row.arrivals.to_string(),
                row.remaining_queue.to_string(),
                opt(row.saturation),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
