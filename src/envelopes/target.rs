//! Exponential "set target at time" automation.

use crate::Signal;

/// A scheduled exponential approach toward a target value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetEvent {
    /// Value the automation converges to
    pub target: f64,
    /// Clock time in seconds at which the approach begins
    pub start_time: f64,
    /// Time constant in seconds; after one constant ~63% of the distance is covered
    pub time_constant: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Ramp {
    target: f64,
    /// Per-sample retention factor, `exp(-1 / (time_constant * sample_rate))`
    retain: f64,
}

/// Control signal that smoothly approaches the last scheduled target.
///
/// Follows `v(t) = target + (v0 - target) * exp(-(t - t0) / time_constant)`
/// from the moment an event starts, where `v0` is whatever value the
/// automation held at `t0`. The value never jumps, so a gain driven by it
/// cannot click.
///
/// Events are scheduled against the automation's own clock, which advances
/// by one sample per `next_sample()` call.
///
/// # Examples
///
/// ```
/// use drift::{Signal, TargetAutomation};
///
/// let mut gain = TargetAutomation::new(0.0, 1000.0);
/// gain.set_target_at_time(1.0, 0.0, 0.1);
///
/// // After five time constants the value is within 1% of the target
/// for _ in 0..500 {
///     gain.next_sample();
/// }
/// assert!((gain.value() - 1.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct TargetAutomation {
    sample_rate: f64,
    frame: u64,
    value: f64,
    active: Option<Ramp>,
    /// Events not yet started, ordered by start time
    pending: Vec<TargetEvent>,
}

impl TargetAutomation {
    /// Creates an automation holding `initial` with nothing scheduled.
    ///
    /// # Arguments
    ///
    /// * `initial` - Value held until the first event starts
    /// * `sample_rate` - Sample rate in Hz of the clock driving the automation
    pub fn new(initial: f64, sample_rate: f64) -> Self {
        Self {
            sample_rate,
            frame: 0,
            value: initial,
            active: None,
            pending: Vec::new(),
        }
    }

    /// Value the next `next_sample()` call starts from.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Clock time in seconds of the next sample to be produced.
    pub fn current_time(&self) -> f64 {
        self.frame as f64 / self.sample_rate
    }

    /// Whether an approach is in progress or waiting to start.
    pub fn is_scheduled(&self) -> bool {
        self.active.is_some() || !self.pending.is_empty()
    }

    /// The value the automation will eventually settle on.
    pub fn final_target(&self) -> f64 {
        self.pending
            .last()
            .map(|event| event.target)
            .or(self.active.map(|ramp| ramp.target))
            .unwrap_or(self.value)
    }

    /// Schedules an exponential approach toward `target` starting at `start_time`.
    ///
    /// A time constant of zero (or less) jumps straight to the target when
    /// the event starts.
    pub fn set_target_at_time(&mut self, target: f64, start_time: f64, time_constant: f64) {
        let event = TargetEvent {
            target,
            start_time,
            time_constant,
        };
        let index = self
            .pending
            .partition_point(|pending| pending.start_time <= start_time);
        self.pending.insert(index, event);
    }

    /// Cancels every event starting at or after `cancel_time` and stops the
    /// ramp in progress, holding the current value.
    pub fn cancel_scheduled_values(&mut self, cancel_time: f64) {
        self.pending.retain(|event| event.start_time < cancel_time);
        self.active = None;
    }

    fn start_due_events(&mut self) {
        let now = self.current_time();
        let due = self.pending.partition_point(|event| event.start_time <= now);
        if due == 0 {
            return;
        }

        // Only the latest due event matters: each one supersedes the last
        let event = self.pending[due - 1];
        self.pending.drain(..due);

        if event.time_constant <= 0.0 {
            self.value = event.target;
            self.active = None;
        } else {
            self.active = Some(Ramp {
                target: event.target,
                retain: (-1.0 / (event.time_constant * self.sample_rate)).exp(),
            });
        }
    }
}

impl Signal for TargetAutomation {
    fn next_sample(&mut self) -> f64 {
        self.start_due_events();

        let output = self.value;
        if let Some(ramp) = self.active {
            self.value = ramp.target + (self.value - ramp.target) * ramp.retain;
        }
        self.frame += 1;
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f64 = 1000.0;

    fn run(automation: &mut TargetAutomation, frames: usize) -> Vec<f64> {
        (0..frames).map(|_| automation.next_sample()).collect()
    }

    #[test]
    fn test_holds_initial_value() {
        let mut automation = TargetAutomation::new(0.25, SAMPLE_RATE);
        assert!(run(&mut automation, 100).iter().all(|&v| v == 0.25));
        assert!(!automation.is_scheduled());
        assert_eq!(automation.final_target(), 0.25);
    }

    #[test]
    fn test_one_time_constant_covers_63_percent() {
        let mut automation = TargetAutomation::new(0.0, SAMPLE_RATE);
        automation.set_target_at_time(1.0, 0.0, 0.5);

        // 500 samples at 1 kHz is exactly one time constant
        run(&mut automation, 500);
        let expected = 1.0 - (-1.0_f64).exp();
        assert!((automation.value() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_and_continuous() {
        let mut automation = TargetAutomation::new(0.0, SAMPLE_RATE);
        automation.set_target_at_time(0.15, 0.0, 0.5);
        let values = run(&mut automation, 3000);

        for pair in values.windows(2) {
            assert!(pair[1] >= pair[0], "approach must not overshoot or reverse");
            assert!(pair[1] - pair[0] < 0.001, "step too large: {:?}", pair);
        }
        assert!((values[2999] - 0.15).abs() < 0.01);
    }

    #[test]
    fn test_event_waits_for_start_time() {
        let mut automation = TargetAutomation::new(0.0, SAMPLE_RATE);
        automation.set_target_at_time(1.0, 0.1, 0.05);

        let before = run(&mut automation, 100);
        assert!(before.iter().all(|&v| v == 0.0));
        assert!(automation.is_scheduled());

        run(&mut automation, 2);
        assert!(automation.value() > 0.0);
    }

    #[test]
    fn test_cancel_then_retarget_starts_from_current_value() {
        let mut automation = TargetAutomation::new(0.0, SAMPLE_RATE);
        automation.set_target_at_time(1.0, 0.0, 0.5);
        run(&mut automation, 200);
        let midway = automation.value();
        assert!(midway > 0.0 && midway < 1.0);

        let now = automation.current_time();
        automation.cancel_scheduled_values(now);
        automation.set_target_at_time(0.0, now, 0.5);

        // First sample after the retarget is the held value, no jump
        assert_eq!(automation.next_sample(), midway);
        assert_eq!(automation.final_target(), 0.0);

        run(&mut automation, 5000);
        assert!(automation.value() < 0.001);
    }

    #[test]
    fn test_cancel_drops_future_events_only() {
        let mut automation = TargetAutomation::new(0.0, SAMPLE_RATE);
        automation.set_target_at_time(0.5, 0.0, 0.1);
        automation.set_target_at_time(1.0, 1.0, 0.1);

        automation.cancel_scheduled_values(0.5);
        assert_eq!(automation.final_target(), 0.5);

        automation.cancel_scheduled_values(0.0);
        assert!(!automation.is_scheduled());
        assert_eq!(automation.final_target(), 0.0);
    }

    #[test]
    fn test_later_event_supersedes_earlier() {
        let mut automation = TargetAutomation::new(0.0, SAMPLE_RATE);
        automation.set_target_at_time(1.0, 0.0, 0.1);
        automation.set_target_at_time(0.2, 0.0, 0.1);
        run(&mut automation, 2000);
        assert!((automation.value() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_zero_time_constant_jumps() {
        let mut automation = TargetAutomation::new(0.0, SAMPLE_RATE);
        automation.set_target_at_time(0.8, 0.0, 0.0);
        assert_eq!(automation.next_sample(), 0.8);
        assert!(!automation.is_scheduled());
    }

    #[test]
    fn test_clock_advances_per_sample() {
        let mut automation = TargetAutomation::new(0.0, SAMPLE_RATE);
        run(&mut automation, 250);
        assert!((automation.current_time() - 0.25).abs() < 1e-12);
    }
}
