// Lexicon-based emotion classifier and rolling emotion history

use std::collections::{BTreeMap, VecDeque};

use super::EmotionCategory;

/// Rolling history capacity. Oldest entries are evicted first.
const HISTORY_CAPACITY: usize = 10;

/// Lexicon terms per non-neutral category, in tie-break (declaration) order.
const EMOTION_LEXICON: &[(EmotionCategory, &[&str])] = &[
    (
        EmotionCategory::Anxious,
        &[
            "anxious", "worried", "nervous", "panic", "fear", "scared", "tense", "restless",
            "on edge", "uneasy",
        ],
    ),
    (
        EmotionCategory::Depressed,
        &[
            "sad", "depressed", "hopeless", "empty", "numb", "worthless", "guilty", "ashamed",
            "despair", "miserable",
        ],
    ),
    (
        EmotionCategory::Stressed,
        &[
            "stressed", "overwhelmed", "pressure", "burden", "exhausted", "burned out", "tired",
            "drained",
        ],
    ),
    (
        EmotionCategory::Angry,
        &[
            "angry", "frustrated", "irritated", "mad", "furious", "annoyed", "resentful",
            "bitter", "hostile",
        ],
    ),
    (
        EmotionCategory::Lonely,
        &[
            "lonely", "alone", "isolated", "disconnected", "abandoned", "rejected", "unwanted",
            "forgotten",
        ],
    ),
    (
        EmotionCategory::Confused,
        &[
            "confused", "lost", "uncertain", "doubtful", "conflicted", "torn", "unclear",
            "mixed",
        ],
    ),
    (
        EmotionCategory::Hopeful,
        &[
            "hopeful", "optimistic", "positive", "better", "improving", "confident",
            "motivated", "encouraged",
        ],
    ),
];

/// Stateless lexicon scorer for the primary emotion of a message.
///
/// The rolling history lives in [`EmotionHistory`], keyed per session by
/// the caller; classification itself is a pure function of the text.
#[derive(Clone, Default)]
pub struct EmotionAnalyzer;

impl EmotionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Classify the primary emotion of a message.
    ///
    /// Counts case-insensitive substring occurrences of each category's
    /// lexicon terms. Returns `(Neutral, 0.0)` when nothing matches;
    /// otherwise the winner is the first maximum in category declaration
    /// order, with confidence = winner hits / total hits across candidate
    /// categories (always in `(0, 1]`).
    pub fn analyze(&self, message: &str) -> (EmotionCategory, f32) {
        let message_lower = message.to_lowercase();

        let mut best: Option<(EmotionCategory, usize)> = None;
        let mut total_hits = 0usize;

        for (category, terms) in EMOTION_LEXICON {
            let hits = terms
                .iter()
                .filter(|term| message_lower.contains(*term))
                .count();

            if hits == 0 {
                continue;
            }

            total_hits += hits;

            // Strictly-greater comparison keeps the first maximum on ties.
            match best {
                Some((_, best_hits)) if hits <= best_hits => {}
                _ => best = Some((*category, hits)),
            }
        }

        match best {
            Some((category, hits)) => {
                let confidence = hits as f32 / total_hits as f32;
                (category, confidence)
            }
            None => (EmotionCategory::Neutral, 0.0),
        }
    }
}

/// Fixed-capacity FIFO history of recent classification outcomes.
///
/// One instance per session, empty at session start, discarded at session
/// end. Recorded on every turn, including neutral zero-confidence results.
#[derive(Debug, Clone)]
pub struct EmotionHistory {
    entries: VecDeque<EmotionCategory>,
}

impl Default for EmotionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Record a classification outcome, evicting the oldest entry once the
    /// history is full.
    pub fn record(&mut self, category: EmotionCategory) {
        if self.entries.len() >= HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(category);
    }

    /// Tally of current history contents. Only categories present at least
    /// once appear in the map.
    pub fn trend(&self) -> BTreeMap<EmotionCategory, usize> {
        let mut trend = BTreeMap::new();
        for category in &self.entries {
            *trend.entry(*category).or_insert(0) += 1;
        }
        trend
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
