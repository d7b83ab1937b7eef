/// Messages from the engine to the render callback.
///
/// The engine is the only producer and the voice is the only consumer, so the
/// queue between them needs no lock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Start the looping generator. Ignored if it is already running
    Start,
    /// Drop gain events starting at or after `cancel_time` and stop the ramp in progress
    CancelScheduledValues { cancel_time: f64 },
    /// Begin an exponential approach of the output gain toward `target`
    SetTargetAtTime {
        target: f64,
        start_time: f64,
        time_constant: f64,
    },
}
