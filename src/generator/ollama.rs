// HTTP client for the Ollama chat API

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ChatTurn, GeneratorError, TextGenerator};
use crate::config::OllamaConfig;

const CHAT_ENDPOINT: &str = "/api/chat";

/// Request body for Ollama's /api/chat endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

/// Non-streaming response body from /api/chat.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

/// Ollama-backed text generator.
pub struct OllamaGenerator {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

impl OllamaGenerator {
    pub fn new(config: &OllamaConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
        })
    }

    fn build_messages(
        &self,
        system_prompt: &str,
        context: &[ChatTurn],
        user_text: &str,
    ) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(context.len() + 2);
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: system_prompt.to_string(),
        });

        for turn in context {
            messages.push(ChatMessage {
                role: turn.role.as_str().to_string(),
                content: turn.text.clone(),
            });
        }

        messages.push(ChatMessage {
            role: "user".to_string(),
            content: user_text.to_string(),
        });

        messages
    }
}

#[async_trait::async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(
        &self,
        system_prompt: &str,
        context: &[ChatTurn],
        user_text: &str,
    ) -> Result<String, GeneratorError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: self.build_messages(system_prompt, context, user_text),
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
                top_p: self.top_p,
                num_predict: self.max_tokens,
            },
        };

        let url = format!("{}{}", self.base_url, CHAT_ENDPOINT);
        tracing::debug!(url = %url, model = %self.model, "Sending request to Ollama");

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Decode(e.to_string()))?;

        tracing::debug!(
            chars = chat_response.message.content.len(),
            "Received Ollama response"
        );

        Ok(chat_response.message.content)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ChatRole;

    #[test]
    fn test_build_messages_alternates_roles() {
        let config = OllamaConfig::default();
        let generator = OllamaGenerator::new(&config).unwrap();

        let context = vec![
            ChatTurn::user("first message"),
            ChatTurn::assistant("first reply"),
        ];

        let messages = generator.build_messages("be supportive", &context, "second message");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "be supportive");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(messages[3].role, "user");
        assert_eq!(messages[3].content, "second message");
        assert_eq!(context[0].role, ChatRole::User);
    }
}
