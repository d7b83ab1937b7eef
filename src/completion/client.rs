use super::prompts::{StoryTheme, soothe_prompt, story_prompt};
use crate::config::CompletionConfig;
use crate::error::CompletionError;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// The parts of a `generateContent` response Drift reads.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate. Blank text counts as
    /// missing.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    config: CompletionConfig,
}

impl GeminiClient {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            http: Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Sends `prompt` and returns the generated text.
    pub async fn try_complete(&self, prompt: &str) -> Result<String, CompletionError> {
        if prompt.trim().is_empty() {
            return Err(CompletionError::EmptyPrompt("prompt is blank"));
        }

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(model = %self.config.model, chars = prompt.len(), "sending completion request");
        let response = self
            .http
            .post(self.config.request_url())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status(status));
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed
            .text()
            .map(str::to_string)
            .ok_or(CompletionError::MissingContent)
    }

    /// Like [`try_complete`](Self::try_complete), but any failure becomes
    /// its fixed fallback text.
    pub async fn complete(&self, prompt: &str) -> String {
        match self.try_complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "completion failed, using fallback");
                e.fallback_text().to_string()
            }
        }
    }

    /// A short comforting reply to a journal entry.
    ///
    /// Fails only when `body` is blank, in which case nothing is sent.
    pub async fn soothe(&self, body: &str) -> Result<String, CompletionError> {
        if body.trim().is_empty() {
            return Err(CompletionError::EmptyPrompt("journal entry is empty"));
        }
        Ok(self.complete(&soothe_prompt(body)).await)
    }

    /// A bedtime story for `theme`.
    pub async fn story(&self, theme: StoryTheme) -> String {
        self.complete(&story_prompt(theme)).await
    }
}
