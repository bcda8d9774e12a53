//! Event sink for diagnostics, replay, and data collection.

use ix_core::{ArmId, Tick};

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] as the tick loop
/// runs.  Events arrive in simulation order: within a tick, arrivals come
/// first, then departures, then the queue snapshot.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick) {
///         if tick.0 % self.interval == 0 {
///             println!("reached {tick}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called when a new phase pass begins.  `pass` counts from 0.
    fn on_pass_start(&mut self, _tick: Tick, _pass: u64) {}

    /// A vehicle joined the back of `arm`'s queue.
    fn on_arrival(&mut self, _tick: Tick, _arm: ArmId) {}

    /// The head-of-queue vehicle on `arm` departed after `delay_secs`.
    fn on_departure(&mut self, _tick: Tick, _arm: ArmId, _delay_secs: u64) {}

    /// Called every `snapshot_interval_ticks` ticks with every arm's queue
    /// length, indexed by `ArmId`.
    fn on_queue_snapshot(&mut self, _tick: Tick, _lengths: &[usize]) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called once when [`Sim::run`][crate::Sim::run] completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Fan events out to two observers, left first.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_pass_start(&mut self, tick: Tick, pass: u64) {
        self.0.on_pass_start(tick, pass);
        self.1.on_pass_start(tick, pass);
    }

    fn on_arrival(&mut self, tick: Tick, arm: ArmId) {
        self.0.on_arrival(tick, arm);
        self.1.on_arrival(tick, arm);
    }

    fn on_departure(&mut self, tick: Tick, arm: ArmId, delay_secs: u64) {
        self.0.on_departure(tick, arm, delay_secs);
        self.1.on_departure(tick, arm, delay_secs);
    }

    fn on_queue_snapshot(&mut self, tick: Tick, lengths: &[usize]) {
        self.0.on_queue_snapshot(tick, lengths);
        self.1.on_queue_snapshot(tick, lengths);
    }

    fn on_tick_end(&mut self, tick: Tick) {
        self.0.on_tick_end(tick);
        self.1.on_tick_end(tick);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.0.on_sim_end(final_tick);
        self.1.on_sim_end(final_tick);
    }
}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_pass_start(&mut self, tick: Tick, pass: u64) {
        (**self).on_pass_start(tick, pass);
    }

    fn on_arrival(&mut self, tick: Tick, arm: ArmId) {
        (**self).on_arrival(tick, arm);
    }

    fn on_departure(&mut self, tick: Tick, arm: ArmId, delay_secs: u64) {
        (**self).on_departure(tick, arm, delay_secs);
    }

    fn on_queue_snapshot(&mut self, tick: Tick, lengths: &[usize]) {
        (**self).on_queue_snapshot(tick, lengths);
    }

    fn on_tick_end(&mut self, tick: Tick) {
        (**self).on_tick_end(tick);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        (**self).on_sim_end(final_tick);
    }
}

// ── EventLog ──────────────────────────────────────────────────────────────────

/// One entry in an [`EventLog`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimEvent {
    Arrival { tick: Tick, arm: ArmId },
    Departure { tick: Tick, arm: ArmId, delay_secs: u64 },
    QueueSnapshot { tick: Tick, lengths: Vec<usize> },
}

impl SimEvent {
    pub fn tick(&self) -> Tick {
        match self {
            SimEvent::Arrival { tick, .. }
            | SimEvent::Departure { tick, .. }
            | SimEvent::QueueSnapshot { tick, .. } => *tick,
        }
    }
}

/// Append-only, in-memory record of arrivals, departures, and snapshots.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SimEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl SimObserver for EventLog {
    fn on_arrival(&mut self, tick: Tick, arm: ArmId) {
        self.events.push(SimEvent::Arrival { tick, arm });
    }

    fn on_departure(&mut self, tick: Tick, arm: ArmId, delay_secs: u64) {
        self.events.push(SimEvent::Departure { tick, arm, delay_secs });
    }

    fn on_queue_snapshot(&mut self, tick: Tick, lengths: &[usize]) {
        self.events.push(SimEvent::QueueSnapshot { tick, lengths: lengths.to_vec() });
    }
}
