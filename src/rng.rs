//! Injectable randomness.
//!
//! Game logic draws through [`RandomSource`] so tests can script exact values.

use bevy_ecs::resource::Resource;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A source of uniform random draws.
pub trait RandomSource: Send + Sync {
    /// Uniform float in `[min, max]`. Returns `min` when the range is empty or inverted.
    fn range_f32(&mut self, min: f32, max: f32) -> f32;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;
}

/// The default source: a small fast PRNG.
#[derive(Debug, Clone)]
pub struct SeededRandom(SmallRng);

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    pub fn from_os() -> Self {
        Self(SmallRng::from_os_rng())
    }
}

impl RandomSource for SeededRandom {
    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.0.random_range(min..=max)
    }

    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index drawn from an empty range");
        if len <= 1 {
            return 0;
        }
        self.0.random_range(0..len)
    }
}

/// The world's random source.
#[derive(Resource)]
pub struct GameRng(Box<dyn RandomSource>);

impl GameRng {
    pub fn new(source: impl RandomSource + 'static) -> Self {
        Self(Box::new(source))
    }

    /// Seeds from `seed` when given, otherwise from the operating system.
    pub fn from_seed_or_os(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(SeededRandom::from_seed(seed)),
            None => Self::new(SeededRandom::from_os()),
        }
    }
}

impl RandomSource for GameRng {
    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        self.0.range_f32(min, max)
    }

    fn index(&mut self, len: usize) -> usize {
        self.0.index(len)
    }
}
