//! Signal processing types and traits.
//!
//! This module provides the signal abstractions the noise voice is built from:
//! - `Signal` trait for all signal sources and processors
//! - `AudioSignal` trait for sample-rate-aware signals
//! - `AudioSignalExt` trait for convenient filter methods

mod audio;
mod core;

pub use audio::{AudioSignal, AudioSignalExt};
pub use core::Signal;
