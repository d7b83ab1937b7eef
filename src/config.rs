//! Configuration for Drift
//!
//! Provides centralized configuration for the noise engine, the completion
//! client and local storage.

use crate::filters::DEFAULT_Q;
use std::path::PathBuf;
use std::time::Duration;

/// Noise engine configuration
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseConfig {
    /// Gain the fade approaches when noise is switched on (0.0 - 1.0)
    pub audible_gain: f64,

    /// Time constant of the exponential fade, in seconds
    pub fade_time_constant: f64,

    /// Length of the looped noise period, in seconds
    pub buffer_seconds: f64,

    /// Lowpass cutoff applied after the noise source, in Hz
    pub lowpass_cutoff: f64,

    /// Lowpass resonance
    pub lowpass_q: f64,

    /// Capacity of the engine-to-render command queue
    pub command_capacity: usize,

    /// Seed for the white noise source; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            audible_gain: 0.15,
            fade_time_constant: 0.5,
            buffer_seconds: 2.0,
            lowpass_cutoff: 5000.0,
            lowpass_q: DEFAULT_Q,
            command_capacity: 256,
            seed: None,
        }
    }
}

impl NoiseConfig {
    /// Fix the noise seed so every run synthesizes the same buffer
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the level noise fades up to
    pub fn with_audible_gain(mut self, gain: f64) -> Self {
        self.audible_gain = gain;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.audible_gain) {
            return Err(format!(
                "Audible gain must be within [0, 1], got {}",
                self.audible_gain
            ));
        }
        if self.fade_time_constant.is_nan() || self.fade_time_constant < 0.0 {
            return Err(format!(
                "Fade time constant must not be negative, got {}",
                self.fade_time_constant
            ));
        }
        if !self.buffer_seconds.is_finite() || self.buffer_seconds <= 0.0 {
            return Err(format!(
                "Buffer length must be positive, got {}s",
                self.buffer_seconds
            ));
        }
        if !self.lowpass_cutoff.is_finite() || self.lowpass_cutoff <= 0.0 {
            return Err(format!(
                "Lowpass cutoff must be positive, got {}Hz",
                self.lowpass_cutoff
            ));
        }
        if self.command_capacity < 4 {
            return Err("Command queue needs room for at least one toggle".to_string());
        }
        Ok(())
    }
}

/// Text completion client configuration
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionConfig {
    /// Base URL of the generative language API
    pub endpoint: String,

    /// Model name used in the request path
    pub model: String,

    /// API key sent as the `key` query parameter
    pub api_key: String,

    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash-preview-09-2025".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl CompletionConfig {
    /// Full URL of the `generateContent` call
    pub fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

/// Configuration for the complete application
#[derive(Clone, Debug, PartialEq)]
pub struct DriftConfig {
    /// Noise engine configuration
    pub noise: NoiseConfig,

    /// Completion client configuration
    pub completion: CompletionConfig,

    /// Directory holding the store file and the log
    pub data_dir: PathBuf,
}

impl Default for DriftConfig {
    fn default() -> Self {
        let data_dir = std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".drift"))
            .unwrap_or_else(|| PathBuf::from(".drift"));

        Self {
            noise: NoiseConfig::default(),
            completion: CompletionConfig::default(),
            data_dir,
        }
    }
}

impl DriftConfig {
    /// Defaults overridden by `DRIFT_DATA_DIR`, `GEMINI_API_KEY` and `DRIFT_MODEL`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os("DRIFT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.completion.api_key = key;
        }
        if let Ok(model) = std::env::var("DRIFT_MODEL") {
            config.completion.model = model;
        }
        config
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the noise configuration
    pub fn with_noise(mut self, noise: NoiseConfig) -> Self {
        self.noise = noise;
        self
    }

    /// Path of the key-value store file
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("store.json")
    }

    /// Path of the log file
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("drift.log")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.noise.validate()?;
        if self.completion.model.trim().is_empty() {
            return Err("Completion model name is required".to_string());
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err("Data directory is required".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DriftConfig::default();
        assert_eq!(config.noise.audible_gain, 0.15);
        assert_eq!(config.noise.fade_time_constant, 0.5);
        assert_eq!(config.noise.buffer_seconds, 2.0);
        assert_eq!(config.noise.lowpass_cutoff, 5000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = DriftConfig::default()
            .with_data_dir("/tmp/drift-test")
            .with_noise(NoiseConfig::default().with_seed(7).with_audible_gain(0.3));

        assert_eq!(config.noise.seed, Some(7));
        assert_eq!(config.noise.audible_gain, 0.3);
        assert_eq!(config.store_path(), PathBuf::from("/tmp/drift-test/store.json"));
    }

    #[test]
    fn test_invalid_gain_rejected() {
        let noise = NoiseConfig::default().with_audible_gain(1.5);
        assert!(noise.validate().is_err());
    }

    #[test]
    fn test_nan_buffer_length_rejected() {
        let noise = NoiseConfig {
            buffer_seconds: f64::NAN,
            ..NoiseConfig::default()
        };
        assert!(noise.validate().is_err());
    }

    #[test]
    fn test_request_url() {
        let completion = CompletionConfig {
            endpoint: "http://localhost:9/v1beta/".to_string(),
            model: "m".to_string(),
            api_key: "k".to_string(),
            ..CompletionConfig::default()
        };
        assert_eq!(
            completion.request_url(),
            "http://localhost:9/v1beta/models/m:generateContent?key=k"
        );
    }
}
