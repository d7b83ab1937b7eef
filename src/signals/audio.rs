//! Audio signal trait for sample-rate-aware signals.

use super::Signal;

/// Common interface for anything that can be played as audio.
///
/// This trait extends `Signal` with the sample rate the samples are produced
/// at. The rate is a runtime value because it is only known once the output
/// device has been opened.
///
/// # Examples
///
/// ```
/// use drift::{AudioSignal, WhiteNoise};
///
/// let noise = WhiteNoise::new(48000.0);
/// assert_eq!(noise.sample_rate(), 48000.0);
/// ```
pub trait AudioSignal: Signal {
    /// Gets the sample rate at which this audio is being generated.
    ///
    /// # Returns
    ///
    /// Sample rate in Hz (e.g., 44100.0 for CD quality)
    fn sample_rate(&self) -> f64;
}

/// Extension trait providing convenient filter methods for audio signals.
///
/// This trait is automatically implemented for all types that implement
/// `AudioSignal`, so the filter can read the sample rate from its source.
///
/// # Examples
///
/// ```
/// use drift::{AudioSignalExt, PinkNoise};
///
/// let noise = PinkNoise::new(44100.0);
/// let filtered = noise.lowpass_filter(5000.0, 0.707);
/// assert_eq!(filtered.cutoff(), 5000.0);
/// ```
pub trait AudioSignalExt: AudioSignal + Sized {
    /// Applies a low-pass filter to this audio signal.
    ///
    /// # Arguments
    ///
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor/resonance, typically 0.5-10.0
    fn lowpass_filter(self, cutoff: f64, q: f64) -> crate::filters::BiquadFilter<Self> {
        crate::filters::BiquadFilter::lowpass(self, cutoff, q)
    }
}

// Blanket implementation for all AudioSignal types
impl<T: AudioSignal> AudioSignalExt for T {}
