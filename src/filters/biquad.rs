//! Biquad lowpass filter.
//!
//! A second-order IIR section using the standard biquad difference equation,
//! with coefficients from Robert Bristow-Johnson's Audio EQ Cookbook.

use crate::{AudioSignal, Signal};

/// Q used when none is given: 1 dB of resonance, the default of the common
/// platform biquad node, expressed as a linear Q.
pub const DEFAULT_Q: f64 = 1.122_018_454_301_963_3;

/// A biquad lowpass filter that processes an input signal.
///
/// Used by the noise voice to take the residual harshness off the top of the
/// pink noise approximation.
///
/// # Examples
///
/// ```
/// use drift::{BiquadFilter, PinkNoise, Signal};
///
/// let noise = PinkNoise::new(44100.0);
/// let mut filtered = BiquadFilter::lowpass(noise, 5000.0, 0.707);
/// let sample = filtered.next_sample();
/// ```
pub struct BiquadFilter<S: AudioSignal> {
    source: S,
    cutoff: f64,
    q: f64,

    // Filter state variables (previous samples)
    x1: f64, // Input at t-1
    x2: f64, // Input at t-2
    y1: f64, // Output at t-1
    y2: f64, // Output at t-2

    // Biquad coefficients (normalized by a0)
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl<S: AudioSignal> BiquadFilter<S> {
    /// Creates a low-pass filter.
    ///
    /// # Arguments
    ///
    /// * `source` - Input signal
    /// * `cutoff` - Cutoff frequency in Hz, clamped below Nyquist
    /// * `q` - Q factor (resonance), typically 0.5-10.0
    pub fn lowpass(source: S, cutoff: f64, q: f64) -> Self {
        let mut filter = Self {
            source,
            cutoff,
            q,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
            b0: 0.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        };
        filter.update_coefficients();
        filter
    }

    fn update_coefficients(&mut self) {
        use std::f64::consts::PI;

        let sample_rate = self.source.sample_rate();
        let nyquist_limit = sample_rate * 0.49;

        // No room for a 1 Hz cutoff below Nyquist: pass the source through
        if nyquist_limit.is_nan() || nyquist_limit < 1.0 {
            self.b0 = 1.0;
            self.b1 = 0.0;
            self.b2 = 0.0;
            self.a1 = 0.0;
            self.a2 = 0.0;
            return;
        }

        let q = self.q.max(0.001); // Prevent division by zero
        let freq = self.cutoff.min(nyquist_limit).max(1.0);

        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let a0 = 1.0 + alpha;
        self.b0 = (1.0 - cos_omega) / 2.0 / a0;
        self.b1 = (1.0 - cos_omega) / a0;
        self.b2 = (1.0 - cos_omega) / 2.0 / a0;
        self.a1 = -2.0 * cos_omega / a0;
        self.a2 = (1.0 - alpha) / a0;
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: AudioSignal> Signal for BiquadFilter<S> {
    fn next_sample(&mut self) -> f64 {
        let x0 = self.source.next_sample();

        // Direct Form I biquad difference equation:
        // y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
        let y0 = self.b0 * x0 + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x0;
        self.y2 = self.y1;
        self.y1 = y0;

        y0
    }
}

impl<S: AudioSignal> AudioSignal for BiquadFilter<S> {
    fn sample_rate(&self) -> f64 {
        self.source.sample_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test source: a sine at a fixed frequency.
    struct Sine {
        phase: f64,
        increment: f64,
        sample_rate: f64,
    }

    impl Sine {
        fn new(frequency: f64, sample_rate: f64) -> Self {
            Self {
                phase: 0.0,
                increment: 2.0 * std::f64::consts::PI * frequency / sample_rate,
                sample_rate,
            }
        }
    }

    impl Signal for Sine {
        fn next_sample(&mut self) -> f64 {
            let sample = self.phase.sin();
            self.phase += self.increment;
            sample
        }
    }

    impl AudioSignal for Sine {
        fn sample_rate(&self) -> f64 {
            self.sample_rate
        }
    }

    struct Dc(f64);

    impl Signal for Dc {
        fn next_sample(&mut self) -> f64 {
            self.0
        }
    }

    impl AudioSignal for Dc {
        fn sample_rate(&self) -> f64 {
            44100.0
        }
    }

    /// Counts up by one per sample at any claimed rate.
    struct Steps {
        next: f64,
        rate: f64,
    }

    impl Signal for Steps {
        fn next_sample(&mut self) -> f64 {
            let sample = self.next;
            self.next += 1.0;
            sample
        }
    }

    impl AudioSignal for Steps {
        fn sample_rate(&self) -> f64 {
            self.rate
        }
    }

    fn peak_after_settling<S: Signal>(signal: &mut S, settle: usize, window: usize) -> f64 {
        for _ in 0..settle {
            signal.next_sample();
        }
        (0..window).fold(0.0_f64, |peak, _| peak.max(signal.next_sample().abs()))
    }

    #[test]
    fn test_lowpass_attenuates_high_frequencies() {
        let mut filter = BiquadFilter::lowpass(Sine::new(15000.0, 44100.0), 5000.0, DEFAULT_Q);
        let peak = peak_after_settling(&mut filter, 1000, 441);
        assert!(peak < 0.2, "Expected attenuation, got {}", peak);
    }

    #[test]
    fn test_lowpass_passes_low_frequencies() {
        let mut filter = BiquadFilter::lowpass(Sine::new(200.0, 44100.0), 5000.0, DEFAULT_Q);
        let peak = peak_after_settling(&mut filter, 1000, 441);
        assert!(peak > 0.9, "Expected pass-through, got {}", peak);
    }

    #[test]
    fn test_unity_dc_gain() {
        let mut filter = BiquadFilter::lowpass(Dc(0.5), 5000.0, DEFAULT_Q);
        for _ in 0..5000 {
            filter.next_sample();
        }
        assert!((filter.next_sample() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_filter_stability() {
        let mut filter = BiquadFilter::lowpass(Sine::new(440.0, 44100.0), 1000.0, 5.0);
        for _ in 0..10000 {
            let sample = filter.next_sample();
            assert!(sample.is_finite(), "Filter became unstable");
            assert!(sample.abs() < 10.0, "Output amplitude too high: {}", sample);
        }
    }

    #[test]
    fn test_q_factor_clamping() {
        let mut filter = BiquadFilter::lowpass(Dc(1.0), 1000.0, 0.0);
        for _ in 0..10 {
            assert!(filter.next_sample().is_finite());
        }
    }

    #[test]
    fn test_frequency_clamping() {
        // Cutoff above Nyquist for a low sample rate
        let mut filter = BiquadFilter::lowpass(Sine::new(440.0, 8000.0), 50000.0, DEFAULT_Q);
        for _ in 0..100 {
            assert!(filter.next_sample().is_finite());
        }
        assert_eq!(filter.cutoff(), 50000.0);
        assert_eq!(filter.sample_rate(), 8000.0);
    }

    #[test]
    fn test_degenerate_sample_rates_pass_through() {
        for rate in [0.0, 1.0, 2.0, f64::NAN] {
            let mut filter = BiquadFilter::lowpass(Steps { next: 0.0, rate }, 5000.0, DEFAULT_Q);
            for step in 0..16 {
                assert_eq!(filter.next_sample(), f64::from(step), "rate {}", rate);
            }
        }
    }

    #[test]
    fn test_lowest_usable_rate_stays_finite() {
        let mut filter = BiquadFilter::lowpass(Sine::new(0.5, 2.05), 5000.0, DEFAULT_Q);
        for _ in 0..1000 {
            assert!(filter.next_sample().is_finite());
        }
    }

    #[test]
    fn test_default_q_is_one_decibel() {
        assert!((20.0 * DEFAULT_Q.log10() - 1.0).abs() < 1e-9);
    }
}
