//! Envelope generators for controlling parameter changes over time.
//!
//! This module provides the exponential target automation used for
//! click-free gain transitions.

mod target;

pub use target::{TargetAutomation, TargetEvent};
