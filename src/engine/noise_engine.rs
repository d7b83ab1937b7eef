//! The noise engine state machine.

use super::{AudioHost, Command, NoiseVoice, OutputContext, VoiceControl};
use crate::config::NoiseConfig;
use crate::error::EngineError;
use crate::noise::NoiseBuffer;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

/// Whether initialized noise is audible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Muted,
    Playing,
}

impl Playback {
    pub fn flipped(self) -> Self {
        match self {
            Playback::Muted => Playback::Playing,
            Playback::Playing => Playback::Muted,
        }
    }
}

/// Lifecycle of a [`NoiseEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No audio graph has been built yet
    Uninitialized,
    /// The graph exists and the generator is looping (or ready to)
    Initialized(Playback),
    /// The host has no audio output; the engine stays silent for good
    Unavailable,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Uninitialized => write!(f, "off"),
            PlaybackState::Initialized(Playback::Muted) => write!(f, "muted"),
            PlaybackState::Initialized(Playback::Playing) => write!(f, "playing"),
            PlaybackState::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Output gain level, always within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct GainTarget(f64);

impl GainTarget {
    pub const SILENT: GainTarget = GainTarget(0.0);

    /// Clamps `level` into [0, 1]. NaN becomes silence.
    pub fn new(level: f64) -> Self {
        if level.is_nan() {
            return Self::SILENT;
        }
        GainTarget(level.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

struct Graph<C> {
    context: C,
    buffer: NoiseBuffer,
    control: VoiceControl,
    started: bool,
    target: GainTarget,
}

/// Ambient pink noise with click-free mute and unmute.
///
/// The engine owns the output context, the noise buffer and the sending end
/// of the voice's command queue. Nothing is allocated until [`initialize`]
/// (or the first [`toggle`]) runs, and the graph is built at most once.
///
/// [`initialize`]: NoiseEngine::initialize
/// [`toggle`]: NoiseEngine::toggle
///
/// # Example
///
/// ```
/// use drift::config::NoiseConfig;
/// use drift::engine::{NoiseEngine, OfflineHost, Playback, PlaybackState};
///
/// let mut engine = NoiseEngine::new(OfflineHost::new(8000), NoiseConfig::default());
/// assert_eq!(engine.state(), PlaybackState::Uninitialized);
///
/// assert_eq!(engine.toggle(), PlaybackState::Initialized(Playback::Playing));
/// assert_eq!(engine.toggle(), PlaybackState::Initialized(Playback::Muted));
/// ```
pub struct NoiseEngine<H: AudioHost> {
    host: H,
    config: NoiseConfig,
    state: PlaybackState,
    unavailable: Option<EngineError>,
    graph: Option<Graph<H::Context>>,
}

impl<H: AudioHost> NoiseEngine<H> {
    pub fn new(host: H, config: NoiseConfig) -> Self {
        Self {
            host,
            config,
            state: PlaybackState::Uninitialized,
            unavailable: None,
            graph: None,
        }
    }

    /// Builds the audio graph: context, noise buffer, looping source, lowpass
    /// and a silent gain stage. Does nothing if already initialized.
    ///
    /// On a host without audio the engine becomes [`PlaybackState::Unavailable`]
    /// and this keeps returning the same error.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        match self.state {
            PlaybackState::Initialized(_) => return Ok(()),
            PlaybackState::Unavailable => {
                return Err(self.unavailable.clone().unwrap_or_else(|| {
                    EngineError::AudioUnavailable("audio output unavailable".into())
                }));
            }
            PlaybackState::Uninitialized => {}
        }

        match self.build_graph() {
            Ok(graph) => {
                tracing::info!(
                    sample_rate = graph.buffer.sample_rate(),
                    frames = graph.buffer.len(),
                    "noise engine initialized"
                );
                self.graph = Some(graph);
                self.state = PlaybackState::Initialized(Playback::Muted);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "noise engine unavailable, staying silent");
                self.state = PlaybackState::Unavailable;
                self.unavailable = Some(e.clone());
                Err(e)
            }
        }
    }

    fn build_graph(&mut self) -> Result<Graph<H::Context>, EngineError> {
        let mut context = self.host.open()?;
        if context.sample_rate() == 0 {
            return Err(EngineError::AudioUnavailable(
                "output reports a zero sample rate".into(),
            ));
        }

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let buffer = NoiseBuffer::synthesize(context.sample_rate(), self.config.buffer_seconds, rng);

        let (voice, control) = NoiseVoice::new(buffer.clone(), &self.config, context.clock().clone());
        context.connect(voice)?;
        tracing::debug!(
            cutoff = self.config.lowpass_cutoff,
            q = self.config.lowpass_q,
            "connected source -> lowpass -> gain -> output"
        );

        Ok(Graph {
            context,
            buffer,
            control,
            started: false,
            target: GainTarget::SILENT,
        })
    }

    /// Mutes or unmutes the noise with an exponential fade, initializing on
    /// first use. Returns the new state.
    ///
    /// An unavailable engine ignores the call. If the command queue has no
    /// room for the fade, the state and gain target are left as they were.
    pub fn toggle(&mut self) -> PlaybackState {
        if self.state == PlaybackState::Uninitialized && self.initialize().is_err() {
            return self.state;
        }

        let PlaybackState::Initialized(playback) = self.state else {
            return self.state;
        };
        let Some(graph) = self.graph.as_mut() else {
            return self.state;
        };

        // A cached Running state can be stale once the platform pauses output
        if let Err(e) = graph.context.resume() {
            tracing::warn!(error = %e, "output context did not resume");
        }

        if !graph.started {
            if graph.control.send(Command::Start) {
                graph.started = true;
            } else {
                tracing::warn!("command queue full, generator start deferred");
            }
        }

        let next = playback.flipped();
        let target = match next {
            Playback::Playing => GainTarget::new(self.config.audible_gain),
            Playback::Muted => GainTarget::SILENT,
        };

        let now = graph.context.current_time();
        let fade = [
            Command::CancelScheduledValues { cancel_time: now },
            Command::SetTargetAtTime {
                target: target.value(),
                start_time: now,
                time_constant: self.config.fade_time_constant,
            },
        ];
        if !graph.control.send_all(&fade) {
            tracing::warn!(state = %self.state, "command queue full, toggle dropped");
            return self.state;
        }

        graph.target = target;
        self.state = PlaybackState::Initialized(next);
        tracing::info!(state = %self.state, target = target.value(), at = now, "noise toggled");
        self.state
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Initialized(Playback::Playing)
    }

    /// The gain the output is currently fading toward.
    pub fn gain_target(&self) -> GainTarget {
        self.graph
            .as_ref()
            .map(|graph| graph.target)
            .unwrap_or(GainTarget::SILENT)
    }

    /// Whether the generator has been told to start.
    pub fn is_started(&self) -> bool {
        self.graph.as_ref().is_some_and(|graph| graph.started)
    }

    pub fn buffer(&self) -> Option<&NoiseBuffer> {
        self.graph.as_ref().map(|graph| &graph.buffer)
    }

    pub fn context(&self) -> Option<&H::Context> {
        self.graph.as_ref().map(|graph| &graph.context)
    }

    pub fn context_mut(&mut self) -> Option<&mut H::Context> {
        self.graph.as_mut().map(|graph| &mut graph.context)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }
}
