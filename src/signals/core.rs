//! Core signal processing trait.
//!
//! This module provides the fundamental `Signal` trait that represents any
//! audio signal source or processor that can generate samples.

/// Common interface for all signal sources and processors.
///
/// Noise generators, the looping buffer source, the lowpass stage and the gain
/// stage all implement this trait, so they can be chained by value.
///
/// The trait provides two fundamental operations:
/// - Single sample generation via `next_sample()`
/// - Batch processing via `process()`
pub trait Signal {
    /// Generates the next sample from the signal.
    ///
    /// # Returns
    ///
    /// A sample value, typically between -1.0 and 1.0 for audio signals
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

impl<S: Signal + ?Sized> Signal for Box<S> {
    fn next_sample(&mut self) -> f64 {
        (**self).next_sample()
    }
}
