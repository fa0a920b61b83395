// src/chat.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{API_KEY_ENV, LlmConfig};
use crate::error::Error;

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One role-tagged message in the session history. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Contract this crate expects from the remote completion service: one
/// synchronous reply per call, no retry, no streaming.
#[async_trait]
pub trait CompletionService {
    /// Produce the assistant's reply for the running conversation,
    /// optionally prefixed by a fixed instruction template.
    async fn complete(
        &self,
        instructions: Option<&str>,
        turns: &[ChatTurn],
    ) -> Result<String, Error>;
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// OpenAI-compatible chat-completions client, authenticated with the
/// credential from the `LLM_API_KEY` environment variable.
pub struct RemoteCompletion {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f64,
}

impl RemoteCompletion {
    pub fn from_config(llm: &LlmConfig) -> Result<Self, Error> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| Error::MissingCredential)?;
        info!(
            url = %llm.base_url,
            model = %llm.model,
            "Using remote completion service"
        );
        Ok(Self {
            client: Client::new(),
            base_url: llm.base_url.clone(),
            model: llm.model.clone(),
            api_key,
            temperature: llm.temperature,
        })
    }
}

#[async_trait]
impl CompletionService for RemoteCompletion {
    async fn complete(
        &self,
        instructions: Option<&str>,
        turns: &[ChatTurn],
    ) -> Result<String, Error> {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        if let Some(instructions) = instructions {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: instructions.to_string(),
            });
        }
        messages.extend(turns.iter().map(|turn| ChatMessage {
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        }));

        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::CompletionStatus { status, body });
        }

        let chat_response: ChatResponse = response.json().await?;
        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(Error::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_serialize_with_lowercase_roles() {
        let json = serde_json::to_string(&ChatTurn::user("hello")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hello"}"#);

        let json = serde_json::to_string(&ChatTurn::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
