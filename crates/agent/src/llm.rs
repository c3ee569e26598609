use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use policydesk_core::config::LlmConfig;

/// Errors from a single backend call. Always per-query; the dispatch loop
/// reports them and keeps serving subsequent queries.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("backend rejected credentials: {0}")]
    Auth(String),
    #[error("backend request timed out after {0}s")]
    Timeout(u64),
    #[error("backend transport failure: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned a malformed response: {0}")]
    MalformedResponse(String),
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_message: &str)
        -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Chat-completions client for OpenAI-compatible endpoints (OpenAI itself,
/// Ollama's `/v1` surface). Bearer auth is attached only when an API key is
/// configured; transport failures are retried up to `max_retries` times.
pub struct HttpLlmClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout_secs: u64,
    max_retries: u32,
}

impl HttpLlmClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());
        let endpoint = format!("{}/v1/chat/completions", base_url.trim_end_matches('/'));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            model: config.model.clone(),
            api_key: config.api_key.as_ref().map(|key| key.expose_secret().to_string()),
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
        })
    }

    async fn send_once(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: user_message },
            ],
        };

        let mut builder = self.http.post(&self.endpoint).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|error| {
            if error.is_timeout() {
                LlmError::Timeout(self.timeout_secs)
            } else {
                LlmError::Http(error)
            }
        })?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Auth(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Backend { status: status.as_u16(), message: body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|error| LlmError::MalformedResponse(error.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::MalformedResponse("reply carried no content".to_string()))
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let mut attempt = 0;
        loop {
            match self.send_once(system_prompt, user_message).await {
                Ok(reply) => return Ok(reply),
                // Auth and server-side errors will not improve on retry.
                Err(error @ (LlmError::Auth(_) | LlmError::Backend { .. })) => return Err(error),
                Err(error) => {
                    if attempt >= self.max_retries {
                        return Err(error);
                    }
                    attempt += 1;
                    warn!(
                        event_name = "llm.request.retry",
                        attempt,
                        error = %error,
                        "retrying backend request"
                    );
                }
            }
        }
    }
}
