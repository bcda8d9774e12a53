//! Fluent builder for constructing a [`Sim`].

use std::time::{Duration, Instant};

use ix_core::{RandomSource, RunConfig, SimRng};
use ix_model::{IntersectionModel, validate_run};

use crate::{CancelToken, Sim, SimResult};

/// Fluent builder for [`Sim<R>`].
///
/// # Required inputs
///
/// - [`IntersectionModel`]: arm count and phase plan
/// - [`RunConfig`]: demand, horizon, service probability, sampling mode
/// - `R: RandomSource`: the run's random stream (or use
///   [`seeded`][SimBuilder::seeded] for a `SimRng` from `config.seed`)
///
/// # Optional inputs
///
/// | Method                 | Default       |
/// |------------------------|---------------|
/// | `.cancel_token(t)`     | never cancels |
/// | `.deadline(instant)`   | no deadline   |
/// | `.time_limit(dur)`     | no deadline   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(model, config, ScriptedSource::new(draws)?)
///     .cancel_token(token.clone())
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: RandomSource> {
    model:    IntersectionModel,
    config:   RunConfig,
    rng:      R,
    cancel:   Option<CancelToken>,
    deadline: Option<Instant>,
}

impl SimBuilder<SimRng> {
    /// Builder whose random stream is `SimRng::new(config.seed)`.
    pub fn seeded(model: IntersectionModel, config: RunConfig) -> Self {
        let rng = SimRng::new(config.seed);
        Self::new(model, config, rng)
    }
}

impl<R: RandomSource> SimBuilder<R> {
    /// Create a builder with all required inputs.
    pub fn new(model: IntersectionModel, config: RunConfig, rng: R) -> Self {
        Self {
            model,
            config,
            rng,
            cancel:   None,
            deadline: None,
        }
    }

    /// Abort the run with `SimError::Cancelled` once `token` is cancelled.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Abort the run with `SimError::DeadlineExceeded` once the wall clock
    /// passes `deadline`.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Like [`deadline`][Self::deadline], measured from now.
    pub fn time_limit(self, limit: Duration) -> Self {
        self.deadline(Instant::now() + limit)
    }

    /// Run the validation pass, then return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<R>> {
        validate_run(&self.model, &self.config)?;
        Ok(self.build_unchecked())
    }

    /// Skip validation.  The engine tolerates anything numerically
    /// degenerate (no arms, no phases, zero horizon, missing rates count as
    /// zero demand, out-of-range arms are never served) but results for
    /// malformed input are not meaningful.
    pub fn build_unchecked(self) -> Sim<R> {
        Sim::new(self.model, self.config, self.rng, self.cancel, self.deadline)
    }
}
