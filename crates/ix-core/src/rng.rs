//! Injectable uniform random sources.
//!
//! # Determinism strategy
//!
//! The engine never touches an ambient generator.  Every Bernoulli trial
//! (arrival and service) pulls one draw from a [`RandomSource`] owned by the
//! run, so identical configuration plus an identical stream reproduces a run
//! bit for bit.
//!
//! Sweeps derive one child stream per run from a root seed:
//!
//!   seed = root_draw XOR (offset * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive offsets uniformly across the seed space.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{CoreError, CoreResult};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

fn check_draw(value: f64) -> CoreResult<f64> {
    if (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(CoreError::DrawOutOfRange(value))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Seeded pseudo-random source for production runs.
///
/// Used only in single-threaded contexts.  Parallel sweeps give each run its
/// own `SimRng` derived via [`child`][Self::child].
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, useful for
    /// seeding per-run streams deterministically from the root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── ScriptedSource ────────────────────────────────────────────────────────────

/// Replays a fixed sequence of draws, wrapping around at the end.
///
/// Intended for tests that need exact control over every Bernoulli trial.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    next:  usize,
    taken: u64,
}

impl ScriptedSource {
    /// Fails if `draws` is empty or any value lies outside `[0, 1)`.
    pub fn new(draws: Vec<f64>) -> CoreResult<Self> {
        if draws.is_empty() {
            return Err(CoreError::EmptyScript);
        }
        for &d in &draws {
            check_draw(d)?;
        }
        Ok(Self { draws, next: 0, taken: 0 })
    }

    /// Total draws handed out so far.
    pub fn taken(&self) -> u64 {
        self.taken
    }
}

impl RandomSource for ScriptedSource {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        let value = self.draws[self.next];
        self.next = (self.next + 1) % self.draws.len();
        self.taken += 1;
        value
    }
}

// ── ConstantSource ────────────────────────────────────────────────────────────

/// Always returns the same draw.
///
/// `ConstantSource::new(0.0)` makes every trial with positive probability
/// succeed; a value close to 1 makes nearly every trial fail.
#[derive(Clone, Copy, Debug)]
pub struct ConstantSource(f64);

impl ConstantSource {
    pub fn new(value: f64) -> CoreResult<Self> {
        check_draw(value).map(ConstantSource)
    }
}

impl RandomSource for ConstantSource {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.0
    }
}
