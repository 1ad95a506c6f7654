// OpenAI-compatible chat completions generator
//
// Works with OpenAI itself and with local servers that expose the same API
// (Ollama, llama.cpp server, vLLM).

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::GenerationRequest;
use super::ReplyGenerator;
use crate::config::GeneratorConfig;

const SYSTEM_PROMPT: &str = "You are a warm, supportive listener in a mental health support chat. \
Respond with empathy in two to four sentences, validate the person's feelings, and ask one gentle \
follow-up question. Do not diagnose, prescribe, or give medical instructions. If the person mentions \
danger to themselves, encourage them to contact the 988 Suicide & Crisis Lifeline or emergency services.";

/// Generator speaking the `/v1/chat/completions` protocol
#[derive(Clone)]
pub struct OpenAiCompatibleGenerator {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    default_model: String,
    provider_name: String,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    history_turns: usize,
}

impl OpenAiCompatibleGenerator {
    /// OpenAI hosted API
    pub fn new_openai(api_key: String, settings: &GeneratorConfig) -> Result<Self> {
        Self::new(
            Some(api_key),
            "https://api.openai.com".to_string(),
            "gpt-4o-mini".to_string(),
            "openai".to_string(),
            settings,
        )
    }

    /// Local Ollama server
    pub fn new_ollama(settings: &GeneratorConfig) -> Result<Self> {
        Self::new(
            None,
            "http://localhost:11434".to_string(),
            "llama3.2".to_string(),
            "ollama".to_string(),
            settings,
        )
    }

    /// Any other compatible endpoint
    pub fn new_custom(base_url: String, model: String, settings: &GeneratorConfig) -> Result<Self> {
        Self::new(None, base_url, model, "custom".to_string(), settings)
    }

    fn new(
        api_key: Option<String>,
        base_url: String,
        default_model: String,
        provider_name: String,
        settings: &GeneratorConfig,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model,
            provider_name,
            temperature: settings.temperature,
            top_p: settings.top_p,
            max_tokens: settings.max_tokens,
            history_turns: settings.history_turns,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.is_empty()).then_some(api_key);
        self
    }

    /// Convert a GenerationRequest to the chat completions format
    fn to_chat_request(&self, request: &GenerationRequest) -> ChatRequest {
        let request = request.clone().with_history_limit(self.history_turns);

        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        });
        for turn in &request.history {
            messages.push(ChatMessage {
                role: turn.speaker.as_str().to_string(),
                content: turn.text.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.utterance,
        });

        ChatRequest {
            model: self.default_model.clone(),
            messages,
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
            stream: false,
        }
    }
}

#[async_trait]
impl ReplyGenerator for OpenAiCompatibleGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let chat_request = self.to_chat_request(request);
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(
            provider = %self.provider_name,
            model = %chat_request.model,
            messages = chat_request.messages.len(),
            "Sending chat completion request"
        );

        let mut builder = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&chat_request);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "{} chat completion failed\n\nStatus: {}\nBody: {}",
                self.provider_name,
                status,
                error_body
            );
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .context("Chat completion returned no choices")?;

        tracing::debug!(
            provider = %self.provider_name,
            finish_reason = ?choice.finish_reason,
            "Received chat completion"
        );

        Ok(choice.message.content.unwrap_or_default())
    }

    fn name(&self) -> &str {
        &self.provider_name
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::Turn;

    #[test]
    fn test_request_includes_system_history_and_utterance() {
        let generator = OpenAiCompatibleGenerator::new_ollama(&GeneratorConfig::default()).unwrap();
        let request = GenerationRequest::new(
            vec![Turn::user("hello"), Turn::assistant("Hi there!")],
            "I had a long day",
        );

        let chat = generator.to_chat_request(&request);

        assert_eq!(chat.model, "llama3.2");
        assert_eq!(chat.messages.len(), 4);
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[1].role, "user");
        assert_eq!(chat.messages[2].role, "assistant");
        assert_eq!(chat.messages[3].content, "I had a long day");
        assert!(!chat.stream);
    }

    #[test]
    fn test_sampling_defaults_carried_over() {
        let generator =
            OpenAiCompatibleGenerator::new_openai("sk-test".to_string(), &GeneratorConfig::default())
                .unwrap();
        let chat = generator.to_chat_request(&GenerationRequest::new(vec![], "hi"));
        assert!((chat.temperature - 0.8).abs() < f32::EPSILON);
        assert!((chat.top_p - 0.92).abs() < f32::EPSILON);
        assert_eq!(chat.max_tokens, 150);
    }

    #[test]
    fn test_empty_api_key_is_dropped() {
        let generator = OpenAiCompatibleGenerator::new_ollama(&GeneratorConfig::default())
            .unwrap()
            .with_api_key("");
        assert!(generator.api_key.is_none());
        assert_eq!(generator.name(), "ollama");
    }
}
