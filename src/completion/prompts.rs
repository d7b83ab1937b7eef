use std::fmt;
use std::str::FromStr;

/// Prompt asking for a short, soothing reply to a journal entry.
pub fn soothe_prompt(body: &str) -> String {
    format!(
        "You are a compassionate sleep therapist. The user wrote this journal entry about what is keeping them awake: \"{body}\". Write a very short, soothing, validating response (max 40 words) that helps them let go of this thought and sleep. Be gentle, warm, and calming."
    )
}

/// Prompt asking for a plotless bedtime story set in `theme`.
pub fn story_prompt(theme: StoryTheme) -> String {
    format!(
        "Write a very slow, boring, and extremely calming bedtime story set in a \"{theme}\". Focus purely on sensory details like soft sounds, dim lights, colors, and stillness. Avoid any plot, conflict, or characters. Just describe the peaceful environment to help someone fall asleep. Keep it under 150 words."
    )
}

/// Settings offered for bedtime stories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoryTheme {
    #[default]
    RainyForest,
    CosmicDrift,
    QuietLibrary,
    OceanDepths,
    SnowyCabin,
}

impl StoryTheme {
    pub const ALL: [StoryTheme; 5] = [
        StoryTheme::RainyForest,
        StoryTheme::CosmicDrift,
        StoryTheme::QuietLibrary,
        StoryTheme::OceanDepths,
        StoryTheme::SnowyCabin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StoryTheme::RainyForest => "Rainy Forest",
            StoryTheme::CosmicDrift => "Cosmic Drift",
            StoryTheme::QuietLibrary => "Quiet Library",
            StoryTheme::OceanDepths => "Ocean Depths",
            StoryTheme::SnowyCabin => "Snowy Cabin",
        }
    }
}

impl fmt::Display for StoryTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StoryTheme {
    type Err = String;

    /// Accepts the display name in any case, with spaces, dashes or
    /// underscores between words.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        StoryTheme::ALL
            .into_iter()
            .find(|theme| {
                theme
                    .name()
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .flat_map(char::to_lowercase)
                    .eq(wanted.chars())
            })
            .ok_or_else(|| {
                let names: Vec<_> = StoryTheme::ALL.iter().map(|t| t.name()).collect();
                format!("unknown theme '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// A titled piece of sleep advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepTip {
    pub title: &'static str,
    pub description: &'static str,
}

pub const SLEEP_TIPS: [SleepTip; 4] = [
    SleepTip {
        title: "The 4-7-8 Method",
        description: "Inhale quietly through the nose for 4 seconds. Hold the breath for 7 seconds. Exhale forcefully through the mouth, making a whoosh sound, for 8 seconds.",
    },
    SleepTip {
        title: "Screen Dimming",
        description: "You are using this app, but try to lower your brightness to the absolute minimum. Blue light suppresses melatonin.",
    },
    SleepTip {
        title: "The 20 Minute Rule",
        description: "If you can't sleep after 20 minutes, don't force it. Get up, do something boring in dim light, and return when tired.",
    },
    SleepTip {
        title: "Progressive Relaxation",
        description: "Start at your toes. Tense them for 5 seconds, then relax. Move to your calves, thighs, and work your way up to your head.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_input() {
        let prompt = soothe_prompt("I keep replaying the meeting");
        assert!(prompt.contains("\"I keep replaying the meeting\""));
        assert!(prompt.contains("max 40 words"));

        let prompt = story_prompt(StoryTheme::OceanDepths);
        assert!(prompt.contains("set in a \"Ocean Depths\""));
        assert!(prompt.contains("under 150 words"));
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("Cosmic Drift".parse::<StoryTheme>(), Ok(StoryTheme::CosmicDrift));
        assert_eq!("snowy-cabin".parse::<StoryTheme>(), Ok(StoryTheme::SnowyCabin));
        assert_eq!("QUIET_LIBRARY".parse::<StoryTheme>(), Ok(StoryTheme::QuietLibrary));
        assert!("Desert".parse::<StoryTheme>().is_err());
    }
}
