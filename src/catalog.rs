use serde::{Deserialize, Serialize};

/// Closed set of trackable habits. The serialized ids double as the storage
/// keys inside each log record and must stay stable across releases.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum HabitKey {
    BibleReading,
    PhysicalExercise,
    HardWork,
    BookReading,
    SleepingWell,
    Hygiene,
    DrinkingWater,
    Journaling,
    HealthyEating,
    CreativeIdle,
    SocialMediaLimit,
}

#[derive(Debug, Clone, Serialize)]
pub struct HabitDefinition {
    pub id: HabitKey,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const HABITS: [HabitDefinition; 11] = [
    HabitDefinition {
        id: HabitKey::BibleReading,
        label: "Scripture Reading",
        icon: "📖",
    },
    HabitDefinition {
        id: HabitKey::PhysicalExercise,
        label: "Physical Exercise",
        icon: "🏃",
    },
    HabitDefinition {
        id: HabitKey::HardWork,
        label: "Hard Work",
        icon: "💼",
    },
    HabitDefinition {
        id: HabitKey::BookReading,
        label: "Book Reading",
        icon: "📚",
    },
    HabitDefinition {
        id: HabitKey::SleepingWell,
        label: "Sleeping Well",
        icon: "😴",
    },
    HabitDefinition {
        id: HabitKey::Hygiene,
        label: "Personal Hygiene",
        icon: "✨",
    },
    HabitDefinition {
        id: HabitKey::DrinkingWater,
        label: "Drinking Water (2L)",
        icon: "💧",
    },
    HabitDefinition {
        id: HabitKey::Journaling,
        label: "Journaling",
        icon: "📝",
    },
    HabitDefinition {
        id: HabitKey::HealthyEating,
        label: "Healthy Eating",
        icon: "🥗",
    },
    HabitDefinition {
        id: HabitKey::CreativeIdle,
        label: "10 min Creative Idle",
        icon: "💡",
    },
    HabitDefinition {
        id: HabitKey::SocialMediaLimit,
        label: "Max 2h Social Media",
        icon: "📱",
    },
];

/// Neutral starting grade for mood and weather on the 1-5 scale.
pub const DEFAULT_GRADE: u8 = 3;
