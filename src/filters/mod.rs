//! Audio filters.

mod biquad;

pub use biquad::{BiquadFilter, DEFAULT_Q};
