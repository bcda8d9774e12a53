//! Plain data row types written by output backends.

use std::fmt;

use ix_analysis::Saturation;
use ix_core::RunConfig;
use ix_model::IntersectionModel;
use ix_sim::RunReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Arrival,
    Departure,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Arrival => "arrival",
            EventKind::Departure => "departure",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One arrival or departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    pub tick:       u64,
    pub kind:       EventKind,
    pub arm:        u32,
    /// Seconds waited; `None` for arrivals.
    pub delay_secs: Option<u64>,
}

/// Queue length of one arm at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSnapshotRow {
    pub tick:      u64,
    pub arm:       u32,
    pub queue_len: u64,
}

/// Final metrics for one arm, joined with its demand and green allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmSummaryRow {
    pub arm:                   u32,
    pub arrival_rate_per_hour: f64,
    pub green_secs:            u64,
    pub mean_delay_secs:       f64,
    pub max_delay_secs:        u64,
    pub max_queue:             u64,
    pub served:                u64,
    pub arrivals:              u64,
    pub remaining_queue:       u64,
    /// `None` when the arm has no effective capacity.
    pub saturation:            Option<f64>,
}

/// Build one summary row per arm of `report`.
///
/// `saturation` is indexed by arm; missing entries are written as `None`.
pub fn summary_rows(
    model:      &IntersectionModel,
    config:     &RunConfig,
    report:     &RunReport,
    saturation: &[Saturation],
) -> Vec<ArmSummaryRow> {
    report
        .arms
        .iter()
        .map(|a| {
            let i = a.arm.index();
            ArmSummaryRow {
                arm:                   a.arm.0,
                arrival_rate_per_hour: config.arrival_rates_per_hour.get(i).copied().unwrap_or(0.0),
                green_secs:            model.arm_green_seconds(a.arm),
                mean_delay_secs:       a.mean_delay_secs,
                max_delay_secs:        a.max_delay_secs,
                max_queue:             a.max_queue as u64,
                served:                a.served,
                arrivals:              a.arrivals,
                remaining_queue:       a.remaining_queue as u64,
                saturation:            match saturation.get(i) {
                    Some(Saturation::Ratio(r)) => Some(*r),
                    _ => None,
                },
            }
        })
        .collect()
}
