//! Generation client
//!
//! Encapsulates HTTP communication with the generative-AI provider.
//! Prompt and completion content is never logged or stored beyond the
//! duration of the call; debug logs carry lengths and token usage only.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::models::provider::*;
use crate::utils::error::{helpers, AppResult};

/// Upstream completion call, as one awaitable seam
///
/// The pipeline depends on this trait so tests can script completions and
/// failures without a network.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one completion and return the model's raw text output
    async fn complete(&self, system: &str, user: &str) -> AppResult<String>;
}

/// HTTP client for an OpenAI-style chat-completion endpoint
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    client: Client,
    config: ProviderConfig,
}

impl HttpCompletionClient {
    /// Create a new client instance
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("careergen/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    fn build_request(&self, system: &str, user: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            max_tokens: self.config.max_tokens,
            temperature: Some(0.7),
        }
    }

    async fn send_once(&self, request: &CompletionRequest) -> Result<Response, reqwest::Error> {
        let url = format!("{}/chat/completions", self.config.base_url);
        self.client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
    }

    /// Extract the completion text from a successful response
    async fn handle_response(&self, response: Response) -> AppResult<String> {
        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| helpers::permanent_upstream(format!("malformed provider response: {e}")))?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Completion finished: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion.first_content().unwrap_or_default().to_string())
    }

    /// Pull the provider's error message out of a non-success body
    async fn error_message(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ProviderErrorResponse>(&body) {
            Ok(parsed) => parsed.error.message,
            Err(_) => format!("provider returned status {status}"),
        }
    }
}

#[async_trait]
impl CompletionProvider for HttpCompletionClient {
    /// Issue the completion call with the retry policy
    ///
    /// Transient failures (timeout, connection error, 5xx) are retried
    /// exactly once with no added delay. The provider's own 429 is
    /// surfaced immediately and never retried; it is kept distinct from
    /// this service's quota errors so the UI can message them differently.
    async fn complete(&self, system: &str, user: &str) -> AppResult<String> {
        let request = self.build_request(system, user);
        debug!(
            "Sending completion request: system_chars={}, user_chars={}",
            system.len(),
            user.len()
        );

        let mut last_transient: Option<String> = None;

        for attempt in 0..2 {
            if attempt > 0 {
                warn!("Transient provider failure, retrying once");
            }

            let response = match self.send_once(&request).await {
                Ok(response) => response,
                Err(e) => {
                    let kind = if e.is_timeout() { "timeout" } else { "connection" };
                    last_transient = Some(format!("{kind} error calling provider"));
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let message = Self::error_message(response).await;
                warn!("Provider rate limit hit: {message}");
                return Err(helpers::provider_rate_limit(format!(
                    "provider rate limit: {message}"
                )));
            }

            if status.is_server_error() {
                last_transient = Some(Self::error_message(response).await);
                continue;
            }

            if !status.is_success() {
                let message = Self::error_message(response).await;
                return Err(helpers::permanent_upstream(message));
            }

            return self.handle_response(response).await;
        }

        Err(helpers::transient_upstream(
            last_transient.unwrap_or_else(|| "provider unavailable".to_string()),
        ))
    }
}
