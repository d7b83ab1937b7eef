//! Ambient noise engine.
//!
//! The engine side ([`NoiseEngine`]) owns the state machine and runs on the
//! caller's thread. The render side ([`NoiseVoice`]) runs wherever the output
//! context renders and is reached only through a lock-free [`Command`] queue
//! and a shared [`RenderClock`].

mod command;
mod context;
#[cfg(feature = "audio-io")]
mod device;
mod noise_engine;
mod offline;
mod voice;

pub use command::Command;
pub use context::{AudioHost, ContextState, OutputContext, RenderClock};
#[cfg(feature = "audio-io")]
pub use device::{CpalContext, CpalHost};
pub use noise_engine::{GainTarget, NoiseEngine, Playback, PlaybackState};
pub use offline::{OfflineContext, OfflineHost};
pub use voice::{NoiseVoice, VoiceControl};
