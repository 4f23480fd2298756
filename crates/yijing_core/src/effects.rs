//! Clock and randomness collaborators.
//!
//! # Responsibility
//! - Give services an injectable notion of "now" and a uniform integer source.
//!
//! # Invariants
//! - `RandomSource::below(n)` returns a value in `0..n` for every `n > 0`.
//! - Production sources are not seeded per request; draws are not
//!   reproducible across runs.

use chrono::{DateTime, FixedOffset, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source of the current wall-clock time, including the caller's offset.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock frozen at one instant; used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }
}

/// Uniform integer generator.
pub trait RandomSource {
    /// Returns a uniformly distributed value in `0..n`.
    ///
    /// Returns `0` when `n == 0`.
    fn below(&self, n: usize) -> usize;

    /// Fair coin flip.
    fn coin(&self) -> bool {
        self.below(2) == 1
    }
}

/// Process-wide thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..n)
    }
}

/// Deterministic generator seeded once.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        // A poisoned lock still holds a usable generator state.
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..n)
    }
}

/// Clock and randomness bundle handed to services.
pub struct Effects {
    pub clock: Box<dyn Clock>,
    pub random: Box<dyn RandomSource>,
}

impl Effects {
    pub fn new(clock: impl Clock + 'static, random: impl RandomSource + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            random: Box::new(random),
        }
    }

    /// Local system clock with the thread-local generator.
    pub fn system() -> Self {
        Self::new(SystemClock, ThreadRandom)
    }
}

#[cfg(test)]
mod tests {
    use super::{RandomSource, SeededRandom, ThreadRandom};

    #[test]
    fn below_stays_in_range() {
        let seeded = SeededRandom::new(17);
        for _ in 0..1_000 {
            assert!(seeded.below(6) < 6);
            assert!(ThreadRandom.below(101) <= 100);
        }
    }

    #[test]
    fn below_zero_is_zero() {
        assert_eq!(ThreadRandom.below(0), 0);
        assert_eq!(SeededRandom::new(1).below(0), 0);
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let left = SeededRandom::new(99);
        let right = SeededRandom::new(99);
        let a: Vec<usize> = (0..20).map(|_| left.below(78)).collect();
        let b: Vec<usize> = (0..20).map(|_| right.below(78)).collect();
        assert_eq!(a, b);
    }
}
