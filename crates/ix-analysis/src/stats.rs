//! Summary statistics over per-arm metric columns.

use ix_sim::{ArmMetrics, RunReport};

/// Mean, extremes, and sample standard deviation of a set of values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummaryStats {
    pub count:   usize,
    pub mean:    f64,
    pub min:     f64,
    pub max:     f64,
    /// Sample (n − 1) standard deviation; 0 for fewer than two values.
    pub std_dev: f64,
}

impl SummaryStats {
    /// `None` for an empty input.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let std_dev = if values.len() < 2 {
            0.0
        } else {
            (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        };
        Some(Self { count: values.len(), mean, min, max, std_dev })
    }
}

/// Cross-arm statistics for the three headline columns of a report.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportStats {
    pub mean_delay: SummaryStats,
    pub max_queue:  SummaryStats,
    pub served:     SummaryStats,
}

impl ReportStats {
    /// `None` if the report has no arms.
    pub fn from_report(report: &RunReport) -> Option<Self> {
        Some(Self {
            mean_delay: SummaryStats::from_values(report.mean_delays())?,
            max_queue:  SummaryStats::from_values(report.max_queues().into_iter().map(|q| q as f64))?,
            served:     SummaryStats::from_values(report.served_counts().into_iter().map(|n| n as f64))?,
        })
    }
}

/// Per-arm statistics of one metric across replicated runs.
///
/// Returns one entry per arm of the first report; arms missing from a later
/// report are skipped for that report.  Empty if `reports` is empty.
pub fn across_runs(reports: &[RunReport], metric: impl Fn(&ArmMetrics) -> f64) -> Vec<SummaryStats> {
    let Some(first) = reports.first() else {
        return Vec::new();
    };
    (0..first.arms.len())
        .filter_map(|i| {
            SummaryStats::from_values(reports.iter().filter_map(|r| r.arms.get(i)).map(&metric))
        })
        .collect()
}
