//! Generated comfort text.
//!
//! A thin client over a hosted text model plus the prompts Drift sends it.
//! Callers that only want something to show use [`GeminiClient::complete`],
//! which never fails.

mod client;
mod prompts;

pub use client::{GeminiClient, GenerateResponse};
pub use prompts::{SLEEP_TIPS, SleepTip, StoryTheme, soothe_prompt, story_prompt};
