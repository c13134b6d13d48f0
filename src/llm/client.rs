//! Client for the external resume generation service
//!
//! Wire format: `POST {endpoint}` with `{"prompt": ...}`, answered by
//! `{"result": ...}`. Connect errors, timeouts, 429 and 5xx responses are
//! retried up to `max_retries` times; everything else fails immediately.

use crate::config::GenerationConfig;
use crate::error::{Result, ResumeBuilderError};
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Anything that can turn a prompt into draft text.
pub trait GenerationService {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    result: String,
}

/// Outcome of a single attempt.
enum Attempt {
    Done(String),
    Transient(ResumeBuilderError),
}

#[derive(Clone)]
pub struct HttpGenerationClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    max_retries: u32,
    retry_backoff: Duration,
}

impl HttpGenerationClient {
    pub fn new(config: &GenerationConfig, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ResumeBuilderError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn attempt(&self, prompt: &str) -> Result<Attempt> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&GenerationRequest { prompt });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Ok(Attempt::Transient(ResumeBuilderError::GenerationFailed(format!(
                    "Generation service timed out: {}",
                    e
                ))));
            }
            Err(e) if e.is_connect() => {
                return Ok(Attempt::Transient(ResumeBuilderError::GenerationFailed(format!(
                    "Generation service unreachable: {}",
                    e
                ))));
            }
            Err(e) => return Err(e.into()),
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generation service returned {}: {}", status, body);
            return Ok(Attempt::Transient(ResumeBuilderError::GenerationFailed(format!(
                "Generation service returned {}",
                status
            ))));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResumeBuilderError::GenerationFailed(format!(
                "Generation service returned {}: {}",
                status, body
            )));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                return Ok(Attempt::Transient(ResumeBuilderError::GenerationFailed(format!(
                    "Timed out reading generation response: {}",
                    e
                ))));
            }
            Err(e) => return Err(e.into()),
        };

        let parsed: GenerationResponse = serde_json::from_str(&body).map_err(|e| {
            ResumeBuilderError::GenerationFailed(format!("Malformed generation response: {}", e))
        })?;

        Ok(Attempt::Done(parsed.result))
    }
}

impl GenerationService for HttpGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(
                    "Generation attempt {} failed, retrying after {}ms...",
                    attempt,
                    self.retry_backoff.as_millis()
                );
                tokio::time::sleep(self.retry_backoff).await;
            }

            debug!("Generation request to {} (attempt {})", self.endpoint, attempt + 1);
            match self.attempt(prompt).await? {
                Attempt::Done(text) => {
                    info!("Generated draft ({} chars)", text.chars().count());
                    return Ok(text);
                }
                Attempt::Transient(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ResumeBuilderError::GenerationFailed("No generation attempt was made".to_string())
        }))
    }
}
