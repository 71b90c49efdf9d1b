// Configuration structs

use serde::Deserialize;
use std::path::PathBuf;

/// Ollama generator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    pub base_url: String,

    /// Model name (e.g., "llama3.1:8b")
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus sampling cutoff
    pub top_p: f32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1:8b".to_string(),
            timeout_secs: 60,
            max_tokens: 500,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// Triage pipeline settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Minimum emotion confidence before an intervention script is appended
    pub confidence_threshold: f32,

    /// Number of recent turns passed to the generator as context
    pub context_turns: usize,

    /// Optional path to a crisis keywords JSON file (built-in lists otherwise)
    pub crisis_keywords_path: Option<PathBuf>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.6,
            context_turns: 3,
            crisis_keywords_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ollama: OllamaConfig,
    pub triage: TriageConfig,
}
