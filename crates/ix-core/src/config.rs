//! Per-run configuration.
//!
//! Typically loaded from a JSON scenario file by the application crate and
//! passed to the simulation builder alongside an intersection model.

use std::fmt;

/// Per-second departure probability used when none is configured.
///
/// A 0.5 Bernoulli trial per green second approximates a saturation flow of
/// roughly 1800 veh/h.
pub const DEFAULT_SERVICE_PROBABILITY: f64 = 0.5;

// ── ArrivalSampling ───────────────────────────────────────────────────────────

/// When the arrival step runs.
///
/// The two modes produce different demand for the same rates, so the choice
/// is always explicit in [`RunConfig`] and logged at the start of every run.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ArrivalSampling {
    /// One arrival trial per arm at the start of every full phase pass.
    /// Realised demand is roughly `1 / cycle_secs` of the nominal rate, so
    /// delays stay below one cycle and light arms may see no vehicle at all.
    PerCycle,
    /// One arrival trial per arm at the start of every tick.  Realised demand
    /// matches the nominal rate.
    #[default]
    PerTick,
}

impl fmt::Display for ArrivalSampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalSampling::PerCycle => f.write_str("per-cycle"),
            ArrivalSampling::PerTick => f.write_str("per-tick"),
        }
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Dynamic inputs for one simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Mean demand per arm in vehicles per hour, indexed by `ArmId`.
    pub arrival_rates_per_hour: Vec<f64>,

    /// Simulated seconds.  A phase pass that starts before the horizon always
    /// runs to completion.
    pub horizon_secs: u64,

    /// Probability that the head-of-queue vehicle on a green arm departs in
    /// one second.
    #[cfg_attr(feature = "serde", serde(default = "default_service_probability"))]
    pub service_probability: f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub arrival_sampling: ArrivalSampling,

    /// Seed for the default `SimRng`.  Ignored when the caller injects its
    /// own random source.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,

    /// Emit a queue snapshot every N ticks.  0 disables snapshots.
    #[cfg_attr(feature = "serde", serde(default))]
    pub snapshot_interval_ticks: u64,
}

#[cfg(feature = "serde")]
fn default_service_probability() -> f64 {
    DEFAULT_SERVICE_PROBABILITY
}

impl RunConfig {
    /// Config with the default service probability, per-tick arrival
    /// sampling, seed 0, and snapshots disabled.
    pub fn new(arrival_rates_per_hour: Vec<f64>, horizon_secs: u64) -> Self {
        Self {
            arrival_rates_per_hour,
            horizon_secs,
            service_probability: DEFAULT_SERVICE_PROBABILITY,
            arrival_sampling: ArrivalSampling::default(),
            seed: 0,
            snapshot_interval_ticks: 0,
        }
    }

    /// Same demand for every one of `n_arms` arms.
    pub fn uniform(n_arms: usize, rate_per_hour: f64, horizon_secs: u64) -> Self {
        Self::new(vec![rate_per_hour; n_arms], horizon_secs)
    }

    pub fn with_sampling(mut self, sampling: ArrivalSampling) -> Self {
        self.arrival_sampling = sampling;
        self
    }

    pub fn with_service_probability(mut self, p: f64) -> Self {
        self.service_probability = p;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_snapshot_interval(mut self, ticks: u64) -> Self {
        self.snapshot_interval_ticks = ticks;
        self
    }

    /// Per-trial arrival probability for `arm` (`rate / 3600`).  Arms with no
    /// configured rate have zero demand.
    #[inline]
    pub fn arrival_probability(&self, arm: usize) -> f64 {
        self.arrival_rates_per_hour.get(arm).copied().unwrap_or(0.0) / 3_600.0
    }
}
