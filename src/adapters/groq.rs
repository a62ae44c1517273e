use crate::adapters::error_message;
use crate::domain::ports::{ConfigProvider, GenerationOptions, LlmClient};
use crate::utils::error::{Result, StudyBuddyError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for Groq's OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn non_zero(value: f32) -> Option<f32> {
    if value == 0.0 {
        None
    } else {
        Some(value)
    }
}

impl GroqClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.groq_api_key(),
            config.groq_base_url(),
            config.groq_model(),
            Duration::from_secs(config.groq_timeout_seconds()),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/openai/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            top_p: options.top_p,
            frequency_penalty: non_zero(options.frequency_penalty),
            presence_penalty: non_zero(options.presence_penalty),
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            max_tokens = options.max_tokens,
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            tracing::error!(status = status.as_u16(), %message, "Completion request failed");
            return Err(StudyBuddyError::LlmError {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatResponse = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| StudyBuddyError::LlmError {
                status: status.as_u16(),
                message: "Completion contained no choices".to_string(),
            })?;

        tracing::debug!(response_chars = text.len(), "Completion received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> GroqClient {
        GroqClient::new(
            "gsk_test",
            server.base_url(),
            "llama-3.1-8b-instant",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_first_choice() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/openai/v1/chat/completions")
                    .header("authorization", "Bearer gsk_test")
                    .json_body_partial(
                        r#"{"model": "llama-3.1-8b-instant", "max_tokens": 2500,
                            "messages": [{"role": "user", "content": "Explain entropy"}]}"#,
                    );
                then.status(200).json_body(json!({
                    "choices": [{"index": 0, "message": {"role": "assistant", "content": "Entropy is..."}}]
                }));
            })
            .await;

        let text = client_for(&server)
            .generate("Explain entropy", &GenerationOptions::new(0.8, 2500))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Entropy is...");
    }

    #[test]
    fn test_zero_penalties_are_omitted() {
        let request = ChatRequest {
            model: "llama-3.1-8b-instant",
            messages: [ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.7,
            max_tokens: 2000,
            top_p: 1.0,
            frequency_penalty: non_zero(0.0),
            presence_penalty: non_zero(0.5),
        };
        let body = serde_json::to_value(&request).unwrap();

        assert!(body.get("frequency_penalty").is_none());
        assert_eq!(body["presence_penalty"], json!(0.5));
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_provider_error_message_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/openai/v1/chat/completions");
                then.status(429).json_body(json!({
                    "error": {"message": "Rate limit reached for model", "type": "tokens"}
                }));
            })
            .await;

        let err = client_for(&server)
            .generate("hi", &GenerationOptions::default())
            .await
            .unwrap_err();

        match err {
            StudyBuddyError::LlmError { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Rate limit reached for model");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/openai/v1/chat/completions");
                then.status(200).json_body(json!({"choices": []}));
            })
            .await;

        let result = client_for(&server)
            .generate("hi", &GenerationOptions::default())
            .await;
        assert!(matches!(result, Err(StudyBuddyError::LlmError { .. })));
    }
}
