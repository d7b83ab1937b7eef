//! Pre-rendered pink noise period.

use super::PinkNoise;
use crate::Signal;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// One pre-synthesized period of pink noise, played on a loop.
///
/// The buffer is mono and immutable once generated. Cloning only bumps a
/// reference count, so the engine and the render callback can share the same
/// samples without copying.
#[derive(Debug, Clone)]
pub struct NoiseBuffer {
    samples: Arc<[f32]>,
    sample_rate: u32,
}

impl NoiseBuffer {
    /// Synthesizes `seconds` of pink noise at `sample_rate`.
    ///
    /// The raw filter output is written in generation order. If any sample
    /// overshoots full scale the whole period is divided by its peak, so every
    /// sample ends up in [-1.0, 1.0] while the spectral shape is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use drift::NoiseBuffer;
    /// use rand::SeedableRng;
    ///
    /// let rng = rand::rngs::StdRng::seed_from_u64(1);
    /// let buffer = NoiseBuffer::synthesize(8000, 2.0, rng);
    /// assert_eq!(buffer.len(), 16000);
    /// ```
    pub fn synthesize<R: Rng>(sample_rate: u32, seconds: f64, rng: R) -> Self {
        let len = (f64::from(sample_rate) * seconds.max(0.0)).round() as usize;
        let mut noise = PinkNoise::with_rng(f64::from(sample_rate), rng);

        let mut raw = vec![0.0; len];
        noise.process(&mut raw);

        let peak = raw.iter().fold(0.0_f64, |peak, s| peak.max(s.abs()));
        let scale = if peak > 1.0 { 1.0 / peak } else { 1.0 };

        let samples: Arc<[f32]> = raw.iter().map(|s| (s * scale) as f32).collect();

        tracing::debug!(
            sample_rate,
            frames = len,
            peak,
            "synthesized pink noise buffer"
        );

        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of frames in one period.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length of one period.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.len() as f64 / f64::from(self.sample_rate))
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0_f32, |peak, s| peak.max(s.abs()))
    }

    /// Whether two handles point at the same synthesized period.
    pub fn shares_storage(&self, other: &NoiseBuffer) -> bool {
        Arc::ptr_eq(&self.samples, &other.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_length_is_two_seconds_of_frames() {
        for rate in [8000, 22050, 44100, 48000] {
            let buffer = NoiseBuffer::synthesize(rate, 2.0, StdRng::seed_from_u64(5));
            assert_eq!(buffer.len(), 2 * rate as usize);
            assert_eq!(buffer.sample_rate(), rate);
            assert_eq!(buffer.duration(), Duration::from_secs(2));
        }
    }

    #[test]
    fn test_amplitude_histogram_within_full_scale() {
        let buffer = NoiseBuffer::synthesize(44100, 2.0, StdRng::seed_from_u64(11));

        // Ten equal-width bins across [-1, 1]; nothing may fall outside
        let mut bins = [0usize; 10];
        for &sample in buffer.samples() {
            assert!((-1.0..=1.0).contains(&sample), "sample {} out of range", sample);
            let index = (((sample + 1.0) / 2.0) * 10.0).floor().min(9.0) as usize;
            bins[index] += 1;
        }

        assert_eq!(bins.iter().sum::<usize>(), buffer.len());
        // Broadband noise centred on zero fills the middle bins most
        assert!(bins[4] + bins[5] > bins[0] + bins[9]);
    }

    #[test]
    fn test_same_seed_is_byte_identical() {
        let a = NoiseBuffer::synthesize(48000, 2.0, StdRng::seed_from_u64(2024));
        let b = NoiseBuffer::synthesize(48000, 2.0, StdRng::seed_from_u64(2024));
        let a_bytes: Vec<u32> = a.samples().iter().map(|s| s.to_bits()).collect();
        let b_bytes: Vec<u32> = b.samples().iter().map(|s| s.to_bits()).collect();
        assert_eq!(a_bytes, b_bytes);
        assert!(!a.shares_storage(&b));
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = NoiseBuffer::synthesize(8000, 1.0, StdRng::seed_from_u64(1));
        let b = NoiseBuffer::synthesize(8000, 1.0, StdRng::seed_from_u64(2));
        assert_ne!(a.samples(), b.samples());
    }

    #[test]
    fn test_clone_shares_storage() {
        let a = NoiseBuffer::synthesize(8000, 0.5, StdRng::seed_from_u64(3));
        let b = a.clone();
        assert!(a.shares_storage(&b));
    }

    #[test]
    fn test_zero_length() {
        let buffer = NoiseBuffer::synthesize(44100, 0.0, StdRng::seed_from_u64(3));
        assert!(buffer.is_empty());
        assert_eq!(buffer.peak(), 0.0);
    }
}
