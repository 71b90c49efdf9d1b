// Message triage: crisis/risk classification, emotion classification,
// and canned therapeutic interventions.
//
// Severity and emotion for a given message are pure functions of the
// message text. Only conversation context (held elsewhere) varies with
// history.

use serde::{Deserialize, Serialize};

pub mod crisis;
pub mod emotion;
pub mod interventions;

pub use crisis::{crisis_resources, CrisisBundle, CrisisDetector, CrisisKeywords, RiskAssessment};
pub use emotion::{EmotionAnalyzer, EmotionHistory};
pub use interventions::technique_for;

/// Coarse urgency classification of a message.
///
/// Ordered by urgency: `Low < Moderate < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl SeverityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "low",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::High => "high",
            SeverityLevel::Critical => "critical",
        }
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse primary-affect classification of a message.
///
/// Declaration order doubles as the deterministic tie-break order when two
/// categories score the same number of lexicon hits: the first maximum in
/// this order wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Anxious,
    Depressed,
    Stressed,
    Angry,
    Lonely,
    Confused,
    Hopeful,
    Neutral,
}

impl EmotionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionCategory::Anxious => "anxious",
            EmotionCategory::Depressed => "depressed",
            EmotionCategory::Stressed => "stressed",
            EmotionCategory::Angry => "angry",
            EmotionCategory::Lonely => "lonely",
            EmotionCategory::Confused => "confused",
            EmotionCategory::Hopeful => "hopeful",
            EmotionCategory::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
