// External text-generation abstraction
//
// The composer talks to an LLM through this trait so callers can plug in
// a real backend (Ollama) or a scripted generator in tests. Generation is
// the only operation in the pipeline that may block or fail; the composer
// recovers from failure with a fixed fallback line and never propagates it.

use async_trait::async_trait;
use thiserror::Error;

pub mod ollama;

pub use ollama::OllamaGenerator;

/// Role of a conversation turn passed to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One role/text entry of generator context.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// Errors from an external generation call.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("request to generation backend failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("generation backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode generation response: {0}")]
    Decode(String),
}

/// Trait for external text generators
///
/// Implementations receive the system prompt, a short ordered context of
/// prior turns, and the current user message, and return the generated
/// reply text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply for the given message and context.
    async fn generate(
        &self,
        system_prompt: &str,
        context: &[ChatTurn],
        user_text: &str,
    ) -> Result<String, GeneratorError>;

    /// Get the generator name (e.g., "ollama")
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_turn_constructors() {
        let turn = ChatTurn::user("hello");
        assert_eq!(turn.role, ChatRole::User);
        assert_eq!(turn.text, "hello");

        let turn = ChatTurn::assistant("hi there");
        assert_eq!(turn.role, ChatRole::Assistant);
        assert_eq!(turn.role.as_str(), "assistant");
    }
}
