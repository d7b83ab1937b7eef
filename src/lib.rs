//! Drift - a quiet space for falling asleep
//!
//! The heart of the crate is an ambient pink noise engine: a pre-rendered
//! noise period looped through a lowpass filter and a gain stage whose
//! level glides exponentially, so muting and unmuting never click. Around it
//! sit the smaller pieces of a sleep aid: a 4-7-8 breathing guide, a sheep
//! counter, a local journal and a client for generated bedtime stories.

pub mod breath;
pub mod combinators;
pub mod completion;
pub mod config;
pub mod counter;
pub mod engine;
pub mod envelopes;
pub mod error;
pub mod filters;
pub mod journal;
pub mod noise;
pub mod onboarding;
pub mod signals;
pub mod store;

// Re-export commonly used types at the crate root
pub use combinators::{Gain, SignalExt};
pub use config::{CompletionConfig, DriftConfig, NoiseConfig};
pub use engine::{GainTarget, NoiseEngine, Playback, PlaybackState};
pub use envelopes::{TargetAutomation, TargetEvent};
pub use error::{CompletionError, EngineError, StoreError};
pub use filters::BiquadFilter;
pub use noise::{LoopingSource, NoiseBuffer, PinkFilter, PinkNoise, WhiteNoise};
pub use signals::{AudioSignal, AudioSignalExt, Signal};
