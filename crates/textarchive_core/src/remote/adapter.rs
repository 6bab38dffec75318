use crate::config::EngineConfig;
use crate::extract::FieldExtractor;
use crate::model::classification::{ClassificationResult, ConfidenceGate};
use crate::remote::wire::{parse_reply, ChatRequest, RemoteVerdict};
use crate::remote::RemoteError;
use chrono::NaiveDate;
use log::debug;
use std::time::Duration;

/// HTTP client for the remote chat-completions classifier.
///
/// Cheap to share by reference; holds no per-call state.
#[derive(Debug, Clone)]
pub struct RemoteInferenceAdapter {
    client: reqwest::Client,
    api_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
    extractor: FieldExtractor,
    gate: ConfidenceGate,
}

impl RemoteInferenceAdapter {
    /// Builds an adapter from engine configuration.
    ///
    /// # Errors
    /// - Returns a message when the HTTP client cannot be constructed.
    pub fn new(config: &EngineConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs))
            .build()
            .map_err(|err| format!("failed to build http client: {err}"))?;

        Ok(Self {
            client,
            api_url: config.llm_api_url.clone(),
            model: config.llm_model.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
            timeout_secs: config.llm_timeout_secs,
            extractor: FieldExtractor::new(config.summary_max_chars),
            gate: ConfidenceGate::new(config.confidence_threshold),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Classifies `text` remotely and extracts fields for the chosen category.
    ///
    /// # Errors
    /// - `RemoteError::Unavailable` on transport failure, timeout or non-2xx.
    /// - `RemoteError::Malformed` when the reply cannot be decoded.
    pub async fn infer(
        &self,
        text: &str,
        today: NaiveDate,
    ) -> Result<ClassificationResult, RemoteError> {
        let verdict = self.request_verdict(text).await?;
        debug!(
            "event=remote_verdict module=remote status=ok category={} confidence={:.2} reasoning_chars={}",
            verdict.category,
            verdict.confidence,
            verdict.reasoning.as_deref().map_or(0, |r| r.chars().count())
        );

        let extracted = self.extractor.extract(verdict.category, text, today);
        Ok(ClassificationResult::new(
            verdict.category,
            verdict.confidence,
            extracted,
            self.gate,
        ))
    }

    /// Sends one classification request and decodes the verdict.
    pub async fn request_verdict(&self, text: &str) -> Result<RemoteVerdict, RemoteError> {
        let request =
            ChatRequest::classification(&self.model, text, self.temperature, self.max_tokens);

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Unavailable(format!("http status {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;
        parse_reply(&body)
    }

    fn transport_error(&self, err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Unavailable(format!("timed out after {}s", self.timeout_secs))
        } else {
            RemoteError::Unavailable(format!("request failed: {err}"))
        }
    }
}
