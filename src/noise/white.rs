//! Uniform noise that excites the pink filter.

use crate::{AudioSignal, Signal};
use rand::Rng;
use rand::rngs::ThreadRng;

/// Independent uniform draws in [-1.0, 1.0], one per sample.
///
/// This is the raw input to [`PinkFilter`](super::PinkFilter). On its own it
/// is far too bright to sleep to; the buffer never plays it unshaped.
///
/// ```
/// use drift::{Signal, WhiteNoise};
/// use rand::SeedableRng;
///
/// let mut noise = WhiteNoise::with_rng(48000.0, rand::rngs::StdRng::seed_from_u64(3));
/// assert!((-1.0..=1.0).contains(&noise.next_sample()));
/// ```
pub struct WhiteNoise<R: Rng = ThreadRng> {
    sample_rate: f64,
    rng: R,
}

impl WhiteNoise {
    /// Draws from the thread-local generator. Every run sounds different.
    pub fn new(sample_rate: f64) -> Self {
        Self::with_rng(sample_rate, rand::thread_rng())
    }
}

impl<R: Rng> WhiteNoise<R> {
    /// Draws from `rng`. With a seeded generator the sequence, and every
    /// buffer built from it, is reproducible.
    pub fn with_rng(sample_rate: f64, rng: R) -> Self {
        Self { sample_rate, rng }
    }
}

impl<R: Rng> Signal for WhiteNoise<R> {
    fn next_sample(&mut self) -> f64 {
        self.rng.gen_range(-1.0..=1.0)
    }
}

impl<R: Rng> AudioSignal for WhiteNoise<R> {
    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}
