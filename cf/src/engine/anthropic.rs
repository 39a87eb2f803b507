//! Anthropic-backed agent engine
//!
//! Renders the agent's prompts against the input mapping and calls the
//! Messages API, with bounded retries on transient errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{AgentEngine, AgentInput, EngineError};
use crate::config::EngineConfig;
use crate::prompts::{self, AgentSpec};

/// Maximum number of retries for transient errors
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay for retries
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Default retry delay when the API rate-limits without a Retry-After header
const DEFAULT_RETRY_AFTER_SECS: u64 = 30;

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504 | 529)
}

/// Agent engine backed by Anthropic's Messages API
pub struct AnthropicEngine {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
    timeout: Duration,
}

impl AnthropicEngine {
    /// Create an engine from configuration
    ///
    /// Reads the API key from the environment variable named in the config.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        debug!(model = %config.model, "from_config: called");
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| EngineError::Config(format!("API key not found; set the {} environment variable", config.api_key_env)))?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(EngineError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
            max_tokens: config.max_tokens,
            timeout,
        })
    }

    fn build_request_body(&self, agent: &AgentSpec, task_prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": agent.system_prompt(),
            "messages": [{ "role": "user", "content": task_prompt }],
        })
    }

    /// Extract the reply text from an API response
    fn parse_response(&self, response: ApiResponse) -> Result<String, EngineError> {
        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "parse_response: called"
        );
        let text: Vec<&str> = response
            .content
            .iter()
            .filter_map(|block| match block {
                ApiContentBlock::Text { text } => Some(text.as_str()),
                ApiContentBlock::Other => None,
            })
            .collect();

        if text.is_empty() {
            return Err(EngineError::InvalidResponse("response contained no text content".to_string()));
        }
        Ok(text.join("\n"))
    }

    async fn send_once(&self, body: &serde_json::Value) -> Result<String, EngineError> {
        let url = format!("{}/v1/messages", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout(self.timeout)
                } else {
                    EngineError::Network(e)
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Err(EngineError::RateLimited {
                retry_after: Duration::from_secs(retry_after),
            });
        }
        if !(200..300).contains(&status) {
            let message = response.text().await.unwrap_or_default();
            return Err(EngineError::Api { status, message });
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout(self.timeout)
            } else {
                EngineError::InvalidResponse(e.to_string())
            }
        })?;
        self.parse_response(api_response)
    }
}

#[async_trait]
impl AgentEngine for AnthropicEngine {
    async fn invoke(&self, agent: &AgentSpec, input: &AgentInput) -> Result<String, EngineError> {
        debug!(agent = %agent.id, model = %self.model, "invoke: called");
        let task_prompt =
            prompts::render_task(agent, input).map_err(|e| EngineError::Prompt(e.to_string()))?;
        let body = self.build_request_body(agent, &task_prompt);

        let mut last_error = None;
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempt - 1);
                warn!(agent = %agent.id, attempt, backoff_ms = backoff, "invoke: retrying after transient error");
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }

            match self.send_once(&body).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    let retryable = match &err {
                        EngineError::Api { status, .. } => is_retryable_status(*status),
                        other => other.is_retryable(),
                    };
                    if !retryable {
                        return Err(err);
                    }
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| EngineError::InvalidResponse("retries exhausted".to_string())))
    }
}

/// Messages API response body
#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ApiContentBlock>,

    #[serde(default)]
    usage: ApiUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ApiContentBlock {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct ApiUsage {
    #[serde(default)]
    input_tokens: u64,

    #[serde(default)]
    output_tokens: u64,
}
