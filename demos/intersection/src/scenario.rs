//! Scenario assembly: preset or JSON file, then command-line overrides.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use ix_core::{ArrivalSampling, RunConfig};
use ix_model::{IntersectionModel, presets};

/// Default demand per arm when no rates are given.
pub const DEFAULT_RATE_PER_HOUR: f64 = 400.0;

/// Default simulated duration.
pub const DEFAULT_HORIZON_SECS: u64 = 1_800;

/// On-disk scenario: the static layout plus one run's dynamic inputs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub model:  IntersectionModel,
    pub config: RunConfig,
}

/// Overrides applied on top of a preset or scenario file.  `None` keeps the
/// loaded value.
#[derive(Default)]
pub struct Overrides {
    pub rates:               Option<Vec<f64>>,
    pub horizon_secs:        Option<u64>,
    pub service_probability: Option<f64>,
    pub sampling:            Option<ArrivalSampling>,
    pub seed:                Option<u64>,
    pub snapshot_interval:   Option<u64>,
    pub cycle_secs:          Option<u32>,
    pub split:               Option<Vec<f64>>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).with_context(|| format!("writing scenario {}", path.display()))
    }

    /// A named preset with uniform default demand.
    pub fn preset(name: &str) -> Result<Self> {
        let Some(model) = presets::by_name(name) else {
            bail!("unknown preset {name:?} (expected plus, tee or star)");
        };
        let config = RunConfig::uniform(model.n_arms, DEFAULT_RATE_PER_HOUR, DEFAULT_HORIZON_SECS);
        Ok(Self { model, config })
    }

    pub fn apply(&mut self, o: Overrides) -> Result<()> {
        if let Some(rates) = o.rates {
            // A single rate applies to every arm.
            self.config.arrival_rates_per_hour = match rates.as_slice() {
                [r] => vec![*r; self.model.n_arms],
                _ => rates,
            };
        }
        if let Some(h) = o.horizon_secs {
            self.config.horizon_secs = h;
        }
        if let Some(p) = o.service_probability {
            self.config.service_probability = p;
        }
        if let Some(s) = o.sampling {
            self.config.arrival_sampling = s;
        }
        if let Some(seed) = o.seed {
            self.config.seed = seed;
        }
        if let Some(n) = o.snapshot_interval {
            self.config.snapshot_interval_ticks = n;
        }
        match (o.split, o.cycle_secs) {
            (Some(split), cycle) => {
                let cycle = match cycle {
                    Some(c) => c,
                    None => u32::try_from(self.model.total_cycle_seconds())
                        .context("current cycle length does not fit in u32")?,
                };
                self.model.apply_split(cycle, &split)?;
            }
            (None, Some(_)) => bail!("--cycle requires --split"),
            (None, None) => {}
        }
        Ok(())
    }
}
