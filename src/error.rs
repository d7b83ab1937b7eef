//! Error types for Drift.
//!
//! Each subsystem has its own error enum. None of the engine errors is ever
//! shown to the user; they are logged and the engine degrades to silence.

use thiserror::Error;

/// Noise engine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The host has no usable audio output. Permanent for the engine's lifetime.
    #[error("Audio output unavailable: {0}")]
    AudioUnavailable(String),

    /// The output context would not leave its suspended state.
    #[error("Output context failed to resume: {0}")]
    TransientResumeFailure(String),

    /// A device was found but the output stream could not be built.
    #[error("Audio stream error: {0}")]
    Stream(String),
}

impl EngineError {
    /// Check if this error is recoverable
    ///
    /// A resume failure is retried on the next toggle. Everything else
    /// leaves the engine permanently silent.
    pub fn is_recoverable(&self) -> bool {
        match self {
            EngineError::AudioUnavailable(_) => false,
            EngineError::TransientResumeFailure(_) => true,
            EngineError::Stream(_) => false,
        }
    }
}

/// Local key-value store and journal errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the store file failed
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded or decoded
    #[error("Store encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// No journal entry with the given id
    #[error("Journal entry not found: {0}")]
    NotFound(String),
}

/// Text completion errors
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The request never produced a readable response
    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Completion service returned {0}")]
    Status(reqwest::StatusCode),

    /// The response parsed but carried no text
    #[error("Completion response had no content")]
    MissingContent,

    /// Refused locally before any request was made
    #[error("Nothing to send: {0}")]
    EmptyPrompt(&'static str),
}

/// Shown when the service answered without usable text.
pub const FALLBACK_NO_CONTENT: &str = "The stars are cloudy right now... try again.";

/// Shown when the service could not be reached at all.
pub const FALLBACK_UNREACHABLE: &str = "Could not reach the dream realm.";

impl CompletionError {
    /// The fixed text shown in place of a completion for this failure.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            CompletionError::Request(_) => FALLBACK_UNREACHABLE,
            CompletionError::Status(_)
            | CompletionError::MissingContent
            | CompletionError::EmptyPrompt(_) => FALLBACK_NO_CONTENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_resume_failures_are_recoverable() {
        assert!(!EngineError::AudioUnavailable("no device".into()).is_recoverable());
        assert!(EngineError::TransientResumeFailure("busy".into()).is_recoverable());
        assert!(!EngineError::Stream("format".into()).is_recoverable());
    }

    #[test]
    fn test_completion_fallbacks() {
        assert_eq!(CompletionError::MissingContent.fallback_text(), FALLBACK_NO_CONTENT);
        assert_eq!(
            CompletionError::Status(reqwest::StatusCode::FORBIDDEN).fallback_text(),
            FALLBACK_NO_CONTENT
        );
    }

    #[test]
    fn test_display_messages() {
        let err = EngineError::AudioUnavailable("no output device".into());
        assert_eq!(err.to_string(), "Audio output unavailable: no output device");
        let err = StoreError::NotFound("42".into());
        assert_eq!(err.to_string(), "Journal entry not found: 42");
    }
}
