//! First-run introduction.

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// Store key set once the introduction has been shown.
pub const ONBOARDING_KEY: &str = "drift_onboarding_seen";

/// One page of the introduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingStep {
    pub title: &'static str,
    pub description: &'static str,
}

pub const ONBOARDING_STEPS: [OnboardingStep; 4] = [
    OnboardingStep {
        title: "Welcome to Drift",
        description: "A quiet space designed to help you disconnect and fall asleep.",
    },
    OnboardingStep {
        title: "Pink Noise",
        description: "Tap the speaker icon in the top right to play soothing Pink Noise. It masks silence and calms the brain.",
    },
    OnboardingStep {
        title: "Breathe & Count",
        description: "Use the 4-7-8 breathing guide or the sheep counter to lower your heart rate.",
    },
    OnboardingStep {
        title: "Clear Your Mind",
        description: "Use the Journal to dump your thoughts, or ask our AI to tell you a boring bedtime story.",
    },
];

/// Whether the introduction has already been shown.
pub fn seen(store: &impl KeyValueStore) -> Result<bool, StoreError> {
    Ok(store.get(ONBOARDING_KEY)?.is_some())
}

pub fn mark_seen(store: &mut impl KeyValueStore) -> Result<(), StoreError> {
    store.set(ONBOARDING_KEY, "true")
}
