//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use ix_core::{ArmId, Tick};
use ix_sim::SimObserver;

use crate::row::{ArmSummaryRow, EventKind, EventRow, QueueSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes vehicle events and queue snapshots to any
/// [`OutputWriter`] backend (CSV, SQLite).
///
/// Events are buffered for the current tick and written in one batch from
/// `on_tick_end`.  Errors from the writer are stored internally because
/// `SimObserver` methods have no return value; only the first is kept.
/// [`finish`][Self::finish] surfaces it.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<EventRow>,
    snapshot:   Vec<QueueSnapshotRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending:    Vec::new(),
            snapshot:   Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer without finishing it.
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write the per-arm summaries, close the writer, and hand it back.
    ///
    /// Returns the first error stored during the run, if any, in preference
    /// to errors from this call.
    pub fn finish(mut self, summaries: &[ArmSummaryRow]) -> OutputResult<W> {
        self.flush_pending();
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        self.writer.write_arm_summaries(summaries)?;
        self.writer.finish()?;
        Ok(self.writer)
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_events(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_arrival(&mut self, tick: Tick, arm: ArmId) {
        self.pending.push(EventRow {
            tick:       tick.0,
            kind:       EventKind::Arrival,
            arm:        arm.0,
            delay_secs: None,
        });
    }

    fn on_departure(&mut self, tick: Tick, arm: ArmId, delay_secs: u64) {
        self.pending.push(EventRow {
            tick:       tick.0,
            kind:       EventKind::Departure,
            arm:        arm.0,
            delay_secs: Some(delay_secs),
        });
    }

    fn on_queue_snapshot(&mut self, tick: Tick, lengths: &[usize]) {
        self.snapshot.clear();
        self.snapshot.extend(lengths.iter().enumerate().map(|(i, &len)| QueueSnapshotRow {
            tick:      tick.0,
            arm:       i as u32,
            queue_len: len as u64,
        }));
        if !self.snapshot.is_empty() {
            let result = self.writer.write_queue_snapshot(&self.snapshot);
            self.store_err(result);
        }
    }

    fn on_tick_end(&mut self, _tick: Tick) {
        self.flush_pending();
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        self.flush_pending();
    }
}
