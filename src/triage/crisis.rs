// Crisis keyword detector and crisis resource bundles

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::SeverityLevel;

/// Tiered crisis keyword lists, checked critical-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisKeywords {
    pub critical: Vec<String>,
    pub high: Vec<String>,
    pub moderate: Vec<String>,
}

impl Default for CrisisKeywords {
    fn default() -> Self {
        fn list(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }

        Self {
            critical: list(&[
                "suicide",
                "kill myself",
                "end my life",
                "want to die",
                "better off dead",
                "no reason to live",
                "self harm",
                "cut myself",
                "overdose",
                "jump off",
                "hang myself",
            ]),
            high: list(&[
                "hopeless",
                "worthless",
                "can't go on",
                "give up",
                "no point",
                "hate myself",
                "panic attack",
                "can't breathe",
                "heart racing",
                "going crazy",
                "losing mind",
            ]),
            moderate: list(&[
                "depressed",
                "anxious",
                "stressed",
                "overwhelmed",
                "lonely",
                "isolated",
                "crying",
                "can't sleep",
                "nightmares",
                "worried sick",
            ]),
        }
    }
}

/// Result of a risk assessment for a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub severity: SeverityLevel,
    /// Matched keywords in list-definition order. Exactly one entry for
    /// critical (first critical keyword found short-circuits the scan).
    pub matched_terms: Vec<String>,
}

/// A helpline name and phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Helpline {
    pub name: String,
    pub number: String,
}

/// Supportive message plus resources associated with a severity tier.
///
/// Critical and high tiers carry helplines; moderate and low carry
/// self-help resource names.
#[derive(Debug, Clone, Serialize)]
pub struct CrisisBundle {
    pub message: &'static str,
    pub helplines: Vec<Helpline>,
    pub self_help: Vec<&'static str>,
}

#[derive(Clone)]
pub struct CrisisDetector {
    keywords: CrisisKeywords,
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self {
            keywords: CrisisKeywords::default(),
        }
    }
}

impl CrisisDetector {
    pub fn new(keywords: CrisisKeywords) -> Self {
        Self { keywords }
    }

    /// Load crisis keywords from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read crisis keywords file: {}", path.display()))?;

        let keywords: CrisisKeywords =
            serde_json::from_str(&contents).context("Failed to parse crisis keywords JSON")?;

        Ok(Self { keywords })
    }

    /// Assess the risk level of a message.
    ///
    /// Matching is lowercase substring containment, not word-boundary aware.
    /// The first critical keyword found returns immediately with that single
    /// term; high and moderate scans collect every matching term.
    pub fn assess(&self, message: &str) -> RiskAssessment {
        let message_lower = message.to_lowercase();

        for keyword in &self.keywords.critical {
            if message_lower.contains(keyword.as_str()) {
                tracing::warn!(keyword = %keyword, "Crisis detected: critical keyword");
                return RiskAssessment {
                    severity: SeverityLevel::Critical,
                    matched_terms: vec![keyword.clone()],
                };
            }
        }

        let high_matches: Vec<String> = self
            .keywords
            .high
            .iter()
            .filter(|k| message_lower.contains(k.as_str()))
            .cloned()
            .collect();

        if !high_matches.is_empty() {
            tracing::warn!(keywords = ?high_matches, "Crisis detected: high-risk keywords");
            return RiskAssessment {
                severity: SeverityLevel::High,
                matched_terms: high_matches,
            };
        }

        let moderate_matches: Vec<String> = self
            .keywords
            .moderate
            .iter()
            .filter(|k| message_lower.contains(k.as_str()))
            .cloned()
            .collect();

        if !moderate_matches.is_empty() {
            return RiskAssessment {
                severity: SeverityLevel::Moderate,
                matched_terms: moderate_matches,
            };
        }

        RiskAssessment {
            severity: SeverityLevel::Low,
            matched_terms: Vec::new(),
        }
    }
}

/// Crisis resource bundle for a severity tier. Total lookup, no failure mode.
pub fn crisis_resources(severity: SeverityLevel) -> CrisisBundle {
    fn line(name: &str, number: &str) -> Helpline {
        Helpline {
            name: name.to_string(),
            number: number.to_string(),
        }
    }

    match severity {
        SeverityLevel::Critical => CrisisBundle {
            message: "I'm deeply concerned about what you're sharing. Your life has value, and help is available right now.",
            helplines: vec![
                line("National Suicide Prevention Lifeline", "9152987821"),
                line("AASRA", "9820466726"),
                line("Vandrevala Foundation", "1860 2662 345"),
            ],
            self_help: vec![],
        },
        SeverityLevel::High => CrisisBundle {
            message: "I can see you're going through a really tough time. You don't have to face this alone.",
            helplines: vec![
                line("iCALL", "9152987821"),
                line("COOJ Mental Health Foundation", "0832-2252525"),
            ],
            self_help: vec![],
        },
        SeverityLevel::Moderate => CrisisBundle {
            message: "I hear that you're struggling. Let's work through this together.",
            helplines: vec![],
            self_help: vec![
                "Deep breathing exercises",
                "Mindfulness meditation",
                "Progressive muscle relaxation",
                "Journaling",
            ],
        },
        SeverityLevel::Low => CrisisBundle {
            message: "I'm here to support you. How can I help you today?",
            helplines: vec![],
            self_help: vec!["General wellness tips", "Stress management"],
        },
    }
}
