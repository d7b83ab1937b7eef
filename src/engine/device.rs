//! Output context backed by the default cpal device.

use super::{AudioHost, ContextState, NoiseVoice, OutputContext, RenderClock};
use crate::error::EngineError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, StreamConfig};

/// Opens the system's default output device.
#[derive(Default)]
pub struct CpalHost;

impl CpalHost {
    pub fn new() -> Self {
        Self
    }
}

impl AudioHost for CpalHost {
    type Context = CpalContext;

    fn open(&mut self) -> Result<CpalContext, EngineError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| EngineError::AudioUnavailable("No output device available".into()))?;

        let config = device
            .default_output_config()
            .map_err(|e| EngineError::AudioUnavailable(e.to_string()))?;

        tracing::info!(
            device = %device.name().unwrap_or_else(|_| "unknown".into()),
            sample_rate = config.sample_rate().0,
            channels = config.channels(),
            format = %config.sample_format(),
            "opened output device"
        );

        Ok(CpalContext {
            clock: RenderClock::new(config.sample_rate().0),
            format: config.sample_format(),
            config: config.into(),
            device,
            stream: None,
            state: ContextState::Suspended,
        })
    }
}

/// A device output context. Starts suspended; the stream is only played on
/// [`OutputContext::resume`].
pub struct CpalContext {
    device: cpal::Device,
    config: StreamConfig,
    format: SampleFormat,
    clock: RenderClock,
    stream: Option<cpal::Stream>,
    state: ContextState,
}

impl OutputContext for CpalContext {
    fn clock(&self) -> &RenderClock {
        &self.clock
    }

    fn state(&self) -> ContextState {
        self.state
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        if let Some(stream) = &self.stream {
            stream
                .play()
                .map_err(|e| EngineError::TransientResumeFailure(e.to_string()))?;
        }
        self.state = ContextState::Running;
        Ok(())
    }

    fn connect(&mut self, voice: NoiseVoice) -> Result<(), EngineError> {
        let stream = match self.format {
            SampleFormat::F32 => build_stream::<f32>(&self.device, &self.config, voice)?,
            SampleFormat::I16 => build_stream::<i16>(&self.device, &self.config, voice)?,
            SampleFormat::U16 => build_stream::<u16>(&self.device, &self.config, voice)?,
            sample_format => {
                return Err(EngineError::Stream(format!(
                    "Unsupported sample format: {}",
                    sample_format
                )));
            }
        };

        // Some backends start streams as soon as they are built
        if let Err(e) = stream.pause() {
            tracing::debug!(error = %e, "could not pause freshly built stream");
        }
        self.state = ContextState::Suspended;
        self.stream = Some(stream);
        Ok(())
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut voice: NoiseVoice,
) -> Result<cpal::Stream, EngineError>
where
    T: Sample + FromSample<f64> + cpal::SizedSample,
{
    let channels = config.channels as usize;

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                voice.fill(data, channels, |sample| T::from_sample(sample));
            },
            |err| tracing::error!(error = %err, "audio stream error"),
            None,
        )
        .map_err(|e| EngineError::Stream(e.to_string()))
}
