//! Noise generators for audio synthesis.
//!
//! This module contains the white noise source, the seven-pole pink filter
//! built on top of it, the pre-rendered buffer the engine plays, and the
//! looping source that plays it.

mod buffer;
mod looping;
mod pink;
mod white;

pub use buffer::NoiseBuffer;
pub use looping::LoopingSource;
pub use pink::{PinkFilter, PinkNoise};
pub use white::WhiteNoise;
