//! Integration tests for ix-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{ArmSummaryRow, EventKind, EventRow, QueueSnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("events.csv").exists());
        assert!(dir.path().join("queue_snapshots.csv").exists());
        assert!(dir.path().join("arm_summaries.csv").exists());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("events.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(&dir, "events.csv"), ["tick", "kind", "arm", "delay_secs"]);
        assert_eq!(headers(&dir, "queue_snapshots.csv"), ["tick", "arm", "queue_len"]);
        assert_eq!(headers(&dir, "arm_summaries.csv")[0], "arm");
        assert_eq!(headers(&dir, "arm_summaries.csv").len(), 10);
    }

    #[test]
    fn arrival_has_empty_delay() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[
            EventRow { tick: 0, kind: EventKind::Arrival, arm: 1, delay_secs: None },
            EventRow { tick: 4, kind: EventKind::Departure, arm: 1, delay_secs: Some(4) },
        ])
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "events.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "arrival");
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[1][1], "departure");
        assert_eq!(&rows[1][3], "4");
    }

    #[test]
    fn snapshot_and_summary_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_queue_snapshot(&[
            QueueSnapshotRow { tick: 60, arm: 0, queue_len: 2 },
            QueueSnapshotRow { tick: 60, arm: 1, queue_len: 0 },
        ])
        .unwrap();
        let summary = ArmSummaryRow {
            arm:                   0,
            arrival_rate_per_hour: 400.0,
            green_secs:            30,
            mean_delay_secs:       12.5,
            max_delay_secs:        40,
            max_queue:             6,
            served:                190,
            arrivals:              195,
            remaining_queue:       5,
            saturation:            None,
        };
        w.write_arm_summaries(&[summary]).unwrap();
        w.finish().unwrap();

        let snaps = records(&dir, "queue_snapshots.csv");
        assert_eq!(snaps.len(), 2);
        assert_eq!(&snaps[0][2], "2");

        let sums = records(&dir, "arm_summaries.csv");
        assert_eq!(sums.len(), 1);
        assert_eq!(&sums[0][3], "12.5");
        assert_eq!(&sums[0][9], "");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use ix_analysis::SaturationEstimator;
    use ix_core::{ArmId, RunConfig, Tick};
    use ix_model::presets;
    use ix_sim::{SimBuilder, SimObserver};

    use crate::row::{ArmSummaryRow, EventKind, EventRow, QueueSnapshotRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult, SimOutputObserver, summary_rows};

    /// Keeps every row in memory; can be told to fail event writes.
    #[derive(Default)]
    struct MemWriter {
        events:      Vec<EventRow>,
        snapshots:   Vec<QueueSnapshotRow>,
        summaries:   Vec<ArmSummaryRow>,
        batches:     usize,
        finished:    usize,
        fail_events: bool,
    }

    impl OutputWriter for MemWriter {
        fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
            if self.fail_events {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.batches += 1;
            self.events.extend_from_slice(rows);
            Ok(())
        }

        fn write_queue_snapshot(&mut self, rows: &[QueueSnapshotRow]) -> OutputResult<()> {
            self.snapshots.extend_from_slice(rows);
            Ok(())
        }

        fn write_arm_summaries(&mut self, rows: &[ArmSummaryRow]) -> OutputResult<()> {
            self.summaries.extend_from_slice(rows);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn events_are_batched_per_tick() {
        let mut obs = SimOutputObserver::new(MemWriter::default());
        obs.on_arrival(Tick(0), ArmId(0));
        obs.on_arrival(Tick(0), ArmId(2));
        obs.on_tick_end(Tick(0));
        obs.on_tick_end(Tick(1));
        obs.on_departure(Tick(2), ArmId(0), 2);
        obs.on_tick_end(Tick(2));

        let w = obs.into_writer();
        assert_eq!(w.batches, 2);
        assert_eq!(w.events.len(), 3);
        assert_eq!(w.events[2].kind, EventKind::Departure);
        assert_eq!(w.events[2].delay_secs, Some(2));
    }

    #[test]
    fn snapshot_rows_are_indexed_by_arm() {
        let mut obs = SimOutputObserver::new(MemWriter::default());
        obs.on_queue_snapshot(Tick(30), &[3, 0, 1]);
        let w = obs.into_writer();
        assert_eq!(w.snapshots.len(), 3);
        assert_eq!(w.snapshots[2], QueueSnapshotRow { tick: 30, arm: 2, queue_len: 1 });
    }

    #[test]
    fn full_run_matches_report() {
        let model = presets::plus(4);
        let config = RunConfig::uniform(4, 400.0, 600).with_seed(11).with_snapshot_interval(60);
        let mut sim = SimBuilder::seeded(model.clone(), config.clone()).build().unwrap();
        let mut obs = SimOutputObserver::new(MemWriter::default());
        let report = sim.run(&mut obs).unwrap();

        let sats = SaturationEstimator::default()
            .estimate(&model, &config.arrival_rates_per_hour)
            .unwrap();
        let rows = summary_rows(&model, &config, &report, &sats);
        let w = obs.finish(&rows).unwrap();

        let arrivals = w.events.iter().filter(|e| e.kind == EventKind::Arrival).count() as u64;
        let departures = w.events.iter().filter(|e| e.kind == EventKind::Departure).count() as u64;
        assert_eq!(arrivals, report.arms.iter().map(|a| a.arrivals).sum::<u64>());
        assert_eq!(departures, report.total_served());

        // Ticks 0, 60, …, 540; four arms each.
        assert_eq!(w.snapshots.len(), 40);
        assert_eq!(w.summaries.len(), 4);
        assert_eq!(w.summaries[0].green_secs, 30);
        assert!(w.summaries.iter().all(|s| s.saturation.is_some()));
        assert_eq!(w.finished, 1);
    }

    #[test]
    fn first_error_is_surfaced_by_finish() {
        let writer = MemWriter { fail_events: true, ..MemWriter::default() };
        let mut obs = SimOutputObserver::new(writer);
        obs.on_arrival(Tick(0), ArmId(0));
        obs.on_tick_end(Tick(0));

        match obs.finish(&[]) {
            Err(OutputError::Io(e)) => assert_eq!(e.to_string(), "disk full"),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("expected the stored write error"),
        }
    }

    #[test]
    fn take_error_clears() {
        let writer = MemWriter { fail_events: true, ..MemWriter::default() };
        let mut obs = SimOutputObserver::new(writer);
        obs.on_arrival(Tick(0), ArmId(0));
        obs.on_tick_end(Tick(0));
        assert!(obs.take_error().is_some());
        assert!(obs.take_error().is_none());
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use ix_core::RunConfig;
    use ix_model::presets;
    use ix_sim::SimBuilder;
    use tempfile::TempDir;

    use crate::row::{EventKind, EventRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;
    use crate::{SimOutputObserver, summary_rows};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn count(conn: &rusqlite::Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0)).unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_events_round_trip() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_events(&[
            EventRow { tick: 0, kind: EventKind::Arrival, arm: 0, delay_secs: None },
            EventRow { tick: 3, kind: EventKind::Departure, arm: 0, delay_secs: Some(3) },
        ])
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        assert_eq!(count(&conn, "events"), 2);
        let null_delays: i64 = conn
            .query_row("SELECT COUNT(*) FROM events WHERE delay_secs IS NULL", [], |r| r.get(0))
            .unwrap();
        assert_eq!(null_delays, 1);
    }

    #[test]
    fn sqlite_full_run() {
        let dir = tmp();
        let model = presets::tee();
        let config = RunConfig::uniform(3, 300.0, 300).with_seed(5).with_snapshot_interval(60);
        let mut sim = SimBuilder::seeded(model.clone(), config.clone()).build().unwrap();
        let mut obs = SimOutputObserver::new(SqliteWriter::new(dir.path()).unwrap());
        let report = sim.run(&mut obs).unwrap();
        obs.finish(&summary_rows(&model, &config, &report, &[])).unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        assert_eq!(count(&conn, "arm_summaries"), 3);
        // Ticks 0, 60, 120, 180, 240; three arms each.
        assert_eq!(count(&conn, "queue_snapshots"), 15);
        let departures: i64 = conn
            .query_row("SELECT COUNT(*) FROM events WHERE kind = 'departure'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(departures as u64, report.total_served());
    }
}
