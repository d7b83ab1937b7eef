//! Looping playback of a pre-rendered noise period.

use super::NoiseBuffer;
use crate::{AudioSignal, Signal};

/// Generator that plays a [`NoiseBuffer`] on an endless loop.
///
/// The source is silent until [`start`](Self::start) is called. Starting is
/// one-shot: once running it never stops, and starting again does nothing.
pub struct LoopingSource {
    buffer: NoiseBuffer,
    position: usize,
    started: bool,
}

impl LoopingSource {
    pub fn new(buffer: NoiseBuffer) -> Self {
        Self {
            buffer,
            position: 0,
            started: false,
        }
    }

    /// Begins playback. Returns `false` if the source was already running.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        true
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Index of the next frame to be played.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn buffer(&self) -> &NoiseBuffer {
        &self.buffer
    }
}

impl Signal for LoopingSource {
    fn next_sample(&mut self) -> f64 {
        if !self.started || self.buffer.is_empty() {
            return 0.0;
        }

        let sample = self.buffer.samples()[self.position];
        self.position += 1;
        if self.position == self.buffer.len() {
            self.position = 0;
        }
        f64::from(sample)
    }
}

impl AudioSignal for LoopingSource {
    fn sample_rate(&self) -> f64 {
        f64::from(self.buffer.sample_rate())
    }
}
