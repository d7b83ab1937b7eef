//! 4-7-8 breathing guide.
//!
//! A countdown that cycles Inhale (4s), Hold (7s) and Exhale (8s) while
//! active. The controller is driven by one [`BreathController::tick`] per
//! second; [`BreathClock`] turns arbitrary elapsed time into those ticks.

use std::fmt;
use std::time::Duration;

/// A step of the breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Ready,
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    /// Whole seconds spent in this phase.
    pub fn duration_secs(self) -> u32 {
        match self {
            BreathPhase::Ready => 0,
            BreathPhase::Inhale => 4,
            BreathPhase::Hold => 7,
            BreathPhase::Exhale => 8,
        }
    }

    /// The phase that follows this one in an active cycle.
    pub fn next(self) -> Self {
        match self {
            BreathPhase::Ready | BreathPhase::Exhale => BreathPhase::Inhale,
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            BreathPhase::Ready => "Tap circle to start",
            BreathPhase::Inhale => "Breathe In",
            BreathPhase::Hold => "Hold Breath",
            BreathPhase::Exhale => "Whoosh Out",
        }
    }
}

impl fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BreathPhase::Ready => "Ready",
            BreathPhase::Inhale => "Inhale",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Exhale",
        };
        f.write_str(name)
    }
}

/// Breathing countdown state.
///
/// # Example
///
/// ```
/// use drift::breath::{BreathController, BreathPhase};
///
/// let mut breath = BreathController::new();
/// breath.toggle();
/// assert_eq!(breath.phase(), BreathPhase::Inhale);
/// assert_eq!(breath.time_left(), 4);
///
/// for _ in 0..4 {
///     breath.tick();
/// }
/// assert_eq!(breath.phase(), BreathPhase::Hold);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreathController {
    active: bool,
    phase: BreathPhase,
    time_left: u32,
}

impl Default for BreathController {
    fn default() -> Self {
        Self::new()
    }
}

impl BreathController {
    pub fn new() -> Self {
        Self {
            active: false,
            phase: BreathPhase::Ready,
            time_left: 0,
        }
    }

    /// Starts at Inhale, or stops and returns to Ready.
    pub fn toggle(&mut self) {
        if self.active {
            self.active = false;
            self.phase = BreathPhase::Ready;
            self.time_left = 0;
        } else {
            self.active = true;
            self.enter(BreathPhase::Inhale);
        }
    }

    fn enter(&mut self, phase: BreathPhase) {
        self.phase = phase;
        self.time_left = phase.duration_secs();
    }

    /// Advances the countdown by one second.
    ///
    /// Returns the new phase when the countdown rolled over into it. Does
    /// nothing while stopped.
    pub fn tick(&mut self) -> Option<BreathPhase> {
        if !self.active {
            return None;
        }
        if self.time_left <= 1 {
            self.enter(self.phase.next());
            return Some(self.phase);
        }
        self.time_left -= 1;
        None
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    /// Seconds left in the current phase.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn instruction(&self) -> &'static str {
        self.phase.instruction()
    }

    pub fn subtitle(&self) -> &'static str {
        if self.active {
            "Follow the numbers"
        } else {
            "4-7-8 Technique"
        }
    }
}

/// Converts elapsed wall time into whole-second ticks.
#[derive(Debug, Clone, Default)]
pub struct BreathClock {
    carry: Duration,
}

impl BreathClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `elapsed` and returns how many full seconds have now passed.
    /// The leftover fraction is kept for the next call.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carry += elapsed;
        let whole = self.carry.as_secs();
        self.carry -= Duration::from_secs(whole);
        u32::try_from(whole).unwrap_or(u32::MAX)
    }

    /// Drops any partial second, e.g. when the guide is restarted.
    pub fn reset(&mut self) {
        self.carry = Duration::ZERO;
    }
}
