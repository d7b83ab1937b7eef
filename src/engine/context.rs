//! Output context abstraction.
//!
//! An output context is the scoped resource through which rendered audio
//! reaches a device. The engine only needs to know its clock and power state,
//! to resume it, and to hand it the voice to render.

use super::NoiseVoice;
use crate::error::EngineError;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Power state of an output context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Rendering and advancing its clock
    Running,
    /// Idle; the clock is frozen and nothing reaches the device
    Suspended,
}

/// Frame counter shared between the render callback and the engine.
///
/// The render side advances it after each block; the engine only reads it to
/// anchor gain automation.
#[derive(Debug, Clone)]
pub struct RenderClock {
    frames: Arc<AtomicU64>,
    sample_rate: u32,
}

impl RenderClock {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Clock time in seconds.
    pub fn seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    pub(crate) fn advance(&self, frames: u64) {
        self.frames.fetch_add(frames, Ordering::Relaxed);
    }
}

/// A device (or stand-in) that renders a [`NoiseVoice`].
pub trait OutputContext {
    /// Clock advanced by the render side.
    fn clock(&self) -> &RenderClock;

    fn state(&self) -> ContextState;

    /// Attempts to move the context to [`ContextState::Running`]. Must be
    /// safe to call on a context that is already running.
    fn resume(&mut self) -> Result<(), EngineError>;

    /// Hands the voice to the render side. Called once per context.
    fn connect(&mut self, voice: NoiseVoice) -> Result<(), EngineError>;

    fn sample_rate(&self) -> u32 {
        self.clock().sample_rate()
    }

    /// Clock time in seconds.
    fn current_time(&self) -> f64 {
        self.clock().seconds()
    }
}

/// Source of output contexts.
pub trait AudioHost {
    type Context: OutputContext;

    /// Acquires the output context, or reports that the host has none.
    fn open(&mut self) -> Result<Self::Context, EngineError>;
}
