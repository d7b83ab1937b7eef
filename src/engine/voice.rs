//! The render-side noise voice.

use super::{Command, RenderClock};
use crate::config::NoiseConfig;
use crate::filters::BiquadFilter;
use crate::noise::{LoopingSource, NoiseBuffer};
use crate::{Gain, Signal, SignalExt, TargetAutomation};
use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

type Chain = Gain<BiquadFilter<LoopingSource>, TargetAutomation>;

/// Generator → lowpass → gain, plus the receiving end of the command queue.
///
/// Lives on the render thread once connected. Commands are drained at the
/// start of every block, so a change scheduled by the engine takes effect on
/// the next block.
pub struct NoiseVoice {
    chain: Chain,
    commands: HeapCons<Command>,
    clock: RenderClock,
}

/// Engine-side handle for sending commands to a [`NoiseVoice`].
pub struct VoiceControl {
    commands: HeapProd<Command>,
}

impl VoiceControl {
    /// Queues a command. Returns `false` if the queue is full.
    pub fn send(&mut self, command: Command) -> bool {
        self.commands.try_push(command).is_ok()
    }

    /// Queues every command or none of them. Returns `false` if there is not
    /// room for the whole batch.
    pub fn send_all(&mut self, commands: &[Command]) -> bool {
        if self.commands.vacant_len() < commands.len() {
            return false;
        }
        commands.iter().all(|command| self.send(*command))
    }
}

impl NoiseVoice {
    /// Builds the voice around `buffer` with the gain stage at silence.
    pub fn new(buffer: NoiseBuffer, config: &NoiseConfig, clock: RenderClock) -> (Self, VoiceControl) {
        let sample_rate = f64::from(buffer.sample_rate());
        let chain = BiquadFilter::lowpass(
            LoopingSource::new(buffer),
            config.lowpass_cutoff,
            config.lowpass_q,
        )
        .gain(TargetAutomation::new(0.0, sample_rate));

        let (producer, consumer) = HeapRb::<Command>::new(config.command_capacity.max(4)).split();

        (
            Self {
                chain,
                commands: consumer,
                clock,
            },
            VoiceControl { commands: producer },
        )
    }

    /// Applies every queued command. Returns how many were applied.
    pub fn apply_pending_commands(&mut self) -> usize {
        let mut applied = 0;
        while let Some(command) = self.commands.try_pop() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Start => {
                self.chain.source.source_mut().start();
            }
            Command::CancelScheduledValues { cancel_time } => {
                self.chain.gain.cancel_scheduled_values(cancel_time);
            }
            Command::SetTargetAtTime {
                target,
                start_time,
                time_constant,
            } => {
                self.chain
                    .gain
                    .set_target_at_time(target, start_time, time_constant);
            }
        }
    }

    /// Renders one block of interleaved frames.
    ///
    /// The mono voice is copied to every channel of a frame. `convert` maps a
    /// sample to the output format.
    pub fn fill<T>(&mut self, data: &mut [T], channels: usize, convert: impl Fn(f64) -> T)
    where
        T: Copy,
    {
        self.apply_pending_commands();

        let channels = channels.max(1);
        let mut frames = 0u64;
        for frame in data.chunks_mut(channels) {
            let value = convert(self.chain.next_sample());
            for slot in frame.iter_mut() {
                *slot = value;
            }
            frames += 1;
        }
        self.clock.advance(frames);
    }

    /// Current output gain as seen by the render side.
    pub fn gain(&self) -> f64 {
        self.chain.gain.value()
    }

    /// Gain the automation is heading toward.
    pub fn gain_target(&self) -> f64 {
        self.chain.gain.final_target()
    }

    pub fn is_started(&self) -> bool {
        self.chain.source.source().is_started()
    }

    pub fn buffer(&self) -> &NoiseBuffer {
        self.chain.source.source().buffer()
    }

    pub fn cutoff(&self) -> f64 {
        self.chain.source.cutoff()
    }
}
