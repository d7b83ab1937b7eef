//! In-memory output context.
//!
//! Renders on demand instead of on a device callback, so the engine can be
//! driven deterministically by tests and by the WAV renderer.

use super::{AudioHost, ContextState, NoiseVoice, OutputContext, RenderClock};
use crate::error::EngineError;

/// Host that hands out [`OfflineContext`]s, or reports no audio at all.
#[derive(Debug, Clone)]
pub struct OfflineHost {
    sample_rate: u32,
    available: bool,
    initial_state: ContextState,
    opened: usize,
}

impl OfflineHost {
    /// A host whose contexts start suspended, like a device context created
    /// before any user gesture.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            available: true,
            initial_state: ContextState::Suspended,
            opened: 0,
        }
    }

    /// A host with no audio output.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(0)
        }
    }

    /// Contexts start in `state` instead of suspended.
    pub fn with_initial_state(mut self, state: ContextState) -> Self {
        self.initial_state = state;
        self
    }

    /// How many contexts have been acquired from this host.
    pub fn contexts_opened(&self) -> usize {
        self.opened
    }
}

impl AudioHost for OfflineHost {
    type Context = OfflineContext;

    fn open(&mut self) -> Result<OfflineContext, EngineError> {
        if !self.available {
            return Err(EngineError::AudioUnavailable(
                "offline host has no output".to_string(),
            ));
        }
        self.opened += 1;
        Ok(OfflineContext::new(self.sample_rate, self.initial_state))
    }
}

/// Output context that renders into memory when asked.
pub struct OfflineContext {
    clock: RenderClock,
    state: ContextState,
    voice: Option<NoiseVoice>,
    connections: usize,
    resume_attempts: usize,
    failing_resumes: usize,
}

impl OfflineContext {
    pub fn new(sample_rate: u32, state: ContextState) -> Self {
        Self {
            clock: RenderClock::new(sample_rate),
            state,
            voice: None,
            connections: 0,
            resume_attempts: 0,
            failing_resumes: 0,
        }
    }

    /// Renders `frames` mono frames.
    ///
    /// A suspended context returns silence and its clock stays frozen.
    pub fn render(&mut self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0f32; frames];
        if self.state == ContextState::Suspended {
            return out;
        }

        match self.voice.as_mut() {
            Some(voice) => voice.fill(&mut out, 1, |sample| sample as f32),
            None => self.clock.advance(frames as u64),
        }
        out
    }

    /// Renders `seconds` worth of frames.
    pub fn render_seconds(&mut self, seconds: f64) -> Vec<f32> {
        let frames = (seconds.max(0.0) * f64::from(self.clock.sample_rate())).round() as usize;
        self.render(frames)
    }

    /// Puts the context to sleep, as a platform does with idle audio.
    pub fn suspend(&mut self) {
        self.state = ContextState::Suspended;
    }

    /// Makes the next `count` resume attempts fail.
    pub fn fail_next_resumes(&mut self, count: usize) {
        self.failing_resumes = count;
    }

    pub fn voice(&self) -> Option<&NoiseVoice> {
        self.voice.as_ref()
    }

    /// How many voices have been connected.
    pub fn connections(&self) -> usize {
        self.connections
    }

    pub fn resume_attempts(&self) -> usize {
        self.resume_attempts
    }
}

impl OutputContext for OfflineContext {
    fn clock(&self) -> &RenderClock {
        &self.clock
    }

    fn state(&self) -> ContextState {
        self.state
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        self.resume_attempts += 1;
        if self.failing_resumes > 0 {
            self.failing_resumes -= 1;
            return Err(EngineError::TransientResumeFailure(
                "offline context refused to resume".to_string(),
            ));
        }
        self.state = ContextState::Running;
        Ok(())
    }

    fn connect(&mut self, voice: NoiseVoice) -> Result<(), EngineError> {
        self.connections += 1;
        self.voice = Some(voice);
        Ok(())
    }
}
