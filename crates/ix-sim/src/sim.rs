//! The `Sim` struct and its tick loop.

use std::time::Instant;

use ix_core::{ArmId, ArrivalSampling, RandomSource, RunConfig, SimClock, Tick};
use ix_model::IntersectionModel;

use crate::{
    CancelToken, MetricsAccumulator, QueueState, RunReport, SimError, SimObserver, SimResult,
};

// ── Phase cursor ──────────────────────────────────────────────────────────────

/// Position inside the current phase pass.
#[derive(Clone, Copy, Debug)]
struct PhaseCursor {
    phase:         usize,
    /// Ticks already spent in `phase`.
    elapsed:       u32,
    /// `true` before the first pass and after each completed pass.
    at_pass_start: bool,
}

impl PhaseCursor {
    fn new() -> Self {
        Self { phase: 0, elapsed: 0, at_pass_start: true }
    }

    /// Move past every phase whose green time is used up.  Zero-green phases
    /// are skipped without consuming a tick.
    fn settle(&mut self, model: &IntersectionModel) {
        while self.phase < model.phases.len()
            && self.elapsed >= model.phases[self.phase].green_time
        {
            self.phase += 1;
            self.elapsed = 0;
        }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// One simulation run.
///
/// `Sim<R>` owns every piece of dynamic state (queues, metrics, clock, and
/// random stream), so independent instances can run side by side.  The model
/// and config are copied in at build time and never change during the run.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: RandomSource> {
    pub model:  IntersectionModel,
    pub config: RunConfig,
    pub clock:  SimClock,

    pub queues:  QueueState,
    pub metrics: MetricsAccumulator,

    rng:              R,
    cursor:           PhaseCursor,
    cycle_secs:       u64,
    passes_started:   u64,
    passes_completed: u64,
    cancel:           Option<CancelToken>,
    deadline:         Option<Instant>,
    /// Reused buffer for queue snapshots.
    lengths:          Vec<usize>,
}

impl<R: RandomSource> Sim<R> {
    pub(crate) fn new(
        model:    IntersectionModel,
        config:   RunConfig,
        rng:      R,
        cancel:   Option<CancelToken>,
        deadline: Option<Instant>,
    ) -> Self {
        let n_arms = model.n_arms;
        Self {
            cycle_secs: model.total_cycle_seconds(),
            model,
            config,
            clock: SimClock::new(),
            queues: QueueState::new(n_arms),
            metrics: MetricsAccumulator::new(n_arms),
            rng,
            cursor: PhaseCursor::new(),
            passes_started: 0,
            passes_completed: 0,
            cancel,
            deadline,
            lengths: Vec::with_capacity(n_arms),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until [`is_finished`][Self::is_finished], then finalise.
    ///
    /// The cancellation token and deadline are checked before every tick.
    /// Degenerate inputs (zero horizon, zero arms, empty or zero-length
    /// phase list) finish immediately with zeroed metrics.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        log::debug!(
            "run start: {} arms, {} phases, cycle {} s, horizon {} s, sampling {}",
            self.model.n_arms,
            self.model.phases.len(),
            self.cycle_secs,
            self.config.horizon_secs,
            self.config.arrival_sampling,
        );
        if self.cycle_secs == 0 && self.config.horizon_secs > 0 {
            log::warn!("zero-length signal cycle; ending run at {}", self.clock.current_tick);
        }

        while !self.is_finished() {
            self.check_interrupt()?;
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);

        let report = self.report();
        log::debug!(
            "run end at {}: {} passes, {} vehicles served",
            report.elapsed,
            report.passes_completed,
            report.total_served(),
        );
        Ok(report)
    }

    /// `true` once a phase pass has completed (or none has started) at or
    /// after the horizon, or when the cycle length is zero.
    pub fn is_finished(&self) -> bool {
        self.cycle_secs == 0
            || (self.cursor.at_pass_start && self.clock.current_tick.0 >= self.config.horizon_secs)
    }

    /// Execute exactly one tick.  Returns `false` without doing anything if
    /// the run is already finished.
    ///
    /// Does not check cancellation; callers driving the loop themselves can
    /// stop between any two steps.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> bool {
        if self.is_finished() {
            return false;
        }
        let now = self.clock.current_tick;

        if self.cursor.at_pass_start {
            self.cursor = PhaseCursor { phase: 0, elapsed: 0, at_pass_start: false };
            self.cursor.settle(&self.model);
            observer.on_pass_start(now, self.passes_started);
            self.passes_started += 1;
            if self.config.arrival_sampling == ArrivalSampling::PerCycle {
                self.sample_arrivals(now, observer);
            }
        }
        if self.config.arrival_sampling == ArrivalSampling::PerTick {
            self.sample_arrivals(now, observer);
        }

        self.serve_phase(now, observer);

        self.metrics.sample_queues(&self.queues);
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            self.queues.fill_lengths(&mut self.lengths);
            observer.on_queue_snapshot(now, &self.lengths);
        }
        observer.on_tick_end(now);

        self.clock.advance();
        self.cursor.elapsed += 1;
        self.cursor.settle(&self.model);
        if self.cursor.phase >= self.model.phases.len() {
            self.cursor.at_pass_start = true;
            self.passes_completed += 1;
            log::trace!("pass {} complete at {}", self.passes_completed, self.clock.current_tick);
        }
        true
    }

    /// Finalise the metrics collected so far.
    pub fn report(&self) -> RunReport {
        RunReport {
            arms:             self.metrics.finalize(&self.queues),
            elapsed:          self.clock.current_tick,
            passes_completed: self.passes_completed,
            sampling:         self.config.arrival_sampling,
        }
    }

    /// Consume the run and hand back its random stream, e.g. to continue a
    /// seeded sequence in the next run.
    pub fn into_rng(self) -> R {
        self.rng
    }

    // ── Tick internals ────────────────────────────────────────────────────

    fn check_interrupt(&self) -> SimResult<()> {
        let at = self.clock.current_tick;
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(SimError::Cancelled { at });
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(SimError::DeadlineExceeded { at });
        }
        Ok(())
    }

    /// One Bernoulli(rate / 3600) trial per arm, ascending.  A draw is taken
    /// for every arm, including zero-demand ones, so the stream position
    /// depends only on the arm count.
    fn sample_arrivals<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        for i in 0..self.model.n_arms {
            let arm = ArmId(i as u32);
            let u = self.rng.next_uniform();
            if u < self.config.arrival_probability(i) {
                self.queues.push(arm, now);
                self.metrics.record_arrival(arm);
                observer.on_arrival(now, arm);
            }
        }
    }

    /// Serve the arms green in the current phase, ascending.  Draws only for
    /// arms with a waiting vehicle.
    fn serve_phase<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        // `model` is public and may have lost phases since build.
        let Some(phase) = self.model.phases.get(self.cursor.phase) else {
            return;
        };
        // Explicit field borrows so the borrow checker sees disjoint access.
        let p       = self.config.service_probability;
        let queues  = &mut self.queues;
        let metrics = &mut self.metrics;
        let rng     = &mut self.rng;

        for &arm in &phase.arms_active {
            if queues.is_empty(arm) {
                continue;
            }
            if rng.next_uniform() < p {
                if let Some(arrived) = queues.pop_oldest(arm) {
                    let delay = now.since(arrived);
                    metrics.record_departure(arm, delay);
                    observer.on_departure(now, arm, delay);
                }
            }
        }
    }
}
