//! Signal combinators for composing audio signals.

use crate::{AudioSignal, Signal};

/// Scales a signal by a control signal (gain/attenuation).
///
/// The gain is itself a `Signal`, so it can be a fixed level or an automation
/// that changes smoothly over time. Both fields are public so the owner of the
/// chain can reach the source and the gain control after composition.
///
/// # Examples
///
/// ```
/// use drift::{Signal, SignalExt, TargetAutomation, WhiteNoise};
///
/// let noise = WhiteNoise::new(44100.0);
/// let mut quiet = noise.gain(TargetAutomation::new(0.5, 44100.0));
/// assert!(quiet.next_sample().abs() <= 0.5);
/// ```
pub struct Gain<S: Signal, G: Signal> {
    pub source: S,
    pub gain: G,
}

impl<S: Signal, G: Signal> Signal for Gain<S, G> {
    fn next_sample(&mut self) -> f64 {
        // Both sides advance every sample so their clocks stay aligned
        let gain = self.gain.next_sample();
        self.source.next_sample() * gain
    }
}

impl<S: AudioSignal, G: Signal> AudioSignal for Gain<S, G> {
    fn sample_rate(&self) -> f64 {
        self.source.sample_rate()
    }
}

/// Extension trait providing fluent combinator methods for all signals.
pub trait SignalExt: Signal + Sized {
    /// Applies a gain control signal to this signal.
    fn gain<G: Signal>(self, gain: G) -> Gain<Self, G> {
        Gain { source: self, gain }
    }
}

impl<T: Signal> SignalExt for T {}
