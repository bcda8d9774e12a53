//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter with a fixed resolution
//! of one simulated second.  Arrival timestamps, delays, and the horizon are
//! all integer seconds, so delay arithmetic is exact and comparisons are O(1).

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter (seconds since the start of a run).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick of one run.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimClock {
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.current_tick.0
    }

    /// Break elapsed time into (hour, minute, second) components.
    /// Useful for human-readable logging without a datetime library.
    pub fn elapsed_hms(&self) -> (u64, u32, u32) {
        let total = self.elapsed_secs();
        let hours = total / 3_600;
        let minutes = ((total % 3_600) / 60) as u32;
        let seconds = (total % 60) as u32;
        (hours, minutes, seconds)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "{} ({:02}:{:02}:{:02})", self.current_tick, h, m, s)
    }
}
