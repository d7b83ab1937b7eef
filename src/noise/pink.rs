//! Pink noise generator implementation.

use super::WhiteNoise;
use crate::{AudioSignal, Signal};
use rand::Rng;

/// Output scale applied to the summed filter bank.
const OUTPUT_SCALE: f64 = 0.11;

/// Seven-pole spectral shaping filter that turns white noise into pink noise.
///
/// Pink noise (also called 1/f noise) has equal power per octave. This filter
/// approximates the -3 dB/octave slope with a bank of one-pole lowpass
/// sections at staggered pole positions (Paul Kellet's refined method). The
/// coefficients are fixed and must not be tuned: the regression tests pin
/// them through the impulse response.
///
/// # Examples
///
/// ```
/// use drift::PinkFilter;
///
/// let mut filter = PinkFilter::new();
/// let first = filter.filter(1.0);
/// assert!((first - 0.181190416).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PinkFilter {
    b0: f64,
    b1: f64,
    b2: f64,
    b3: f64,
    b4: f64,
    b5: f64,
    b6: f64,
}

impl PinkFilter {
    /// Creates a filter with all seven state variables at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one white noise sample through the filter bank.
    ///
    /// # Arguments
    ///
    /// * `white` - White noise sample, expected in [-1.0, 1.0]
    ///
    /// # Returns
    ///
    /// The next pink noise sample, already scaled by the output gain
    pub fn filter(&mut self, white: f64) -> f64 {
        self.b0 = 0.99886 * self.b0 + white * 0.0555179;
        self.b1 = 0.99332 * self.b1 + white * 0.0750759;
        self.b2 = 0.96900 * self.b2 + white * 0.1538520;
        self.b3 = 0.86650 * self.b3 + white * 0.3104856;
        self.b4 = 0.55000 * self.b4 + white * 0.5329522;
        self.b5 = -0.7616 * self.b5 - white * 0.0168980;

        let sum = self.b0
            + self.b1
            + self.b2
            + self.b3
            + self.b4
            + self.b5
            + self.b6
            + white * 0.5362;

        // b6 is a one-sample delay, so it is updated after the sum
        self.b6 = white * 0.115926;

        sum * OUTPUT_SCALE
    }

    /// Clears all filter state back to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A pink noise generator.
///
/// Draws uniform white noise and shapes it with [`PinkFilter`].
pub struct PinkNoise<R: Rng = rand::rngs::ThreadRng> {
    white: WhiteNoise<R>,
    filter: PinkFilter,
}

impl PinkNoise<rand::rngs::ThreadRng> {
    /// Creates a new pink noise generator with the default ThreadRng.
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Sample rate in Hz (e.g., 44100.0 for CD quality)
    ///
    /// # Examples
    ///
    /// ```
    /// use drift::{Signal, PinkNoise};
    ///
    /// let mut noise = PinkNoise::new(44100.0);
    /// let sample = noise.next_sample();
    /// ```
    pub fn new(sample_rate: f64) -> Self {
        Self {
            white: WhiteNoise::new(sample_rate),
            filter: PinkFilter::new(),
        }
    }
}

impl<R: Rng> PinkNoise<R> {
    /// Creates a new pink noise generator with a custom RNG.
    ///
    /// # Examples
    ///
    /// ```
    /// use drift::{Signal, PinkNoise};
    /// use rand::SeedableRng;
    ///
    /// let rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let mut noise = PinkNoise::with_rng(44100.0, rng);
    /// let sample = noise.next_sample();
    /// ```
    pub fn with_rng(sample_rate: f64, rng: R) -> Self {
        Self {
            white: WhiteNoise::with_rng(sample_rate, rng),
            filter: PinkFilter::new(),
        }
    }
}

impl<R: Rng> Signal for PinkNoise<R> {
    fn next_sample(&mut self) -> f64 {
        let white = self.white.next_sample();
        self.filter.filter(white)
    }
}

impl<R: Rng> AudioSignal for PinkNoise<R> {
    fn sample_rate(&self) -> f64 {
        self.white.sample_rate()
    }
}
