//! Claude API client for recommendation enrichment
//!
//! Requires the `ai` feature to be enabled:
//! ```toml
//! citegeist = { version = "0.4", features = ["ai"] }
//! ```

use super::EnrichmentResponse;
use crate::AuditResult;
use thiserror::Error;

/// Enrichment failures. Every variant is recoverable by falling back to the
/// rule-based recommendations; none of them may corrupt the report.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("ANTHROPIC_API_KEY environment variable not set")]
    NoApiKey,
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("rate limited - try again later")]
    RateLimited,
    #[error("API error: {0}")]
    ApiError(String),
}

/// Claude API client. Constructed explicitly and passed in by the caller;
/// there is no shared global client.
#[allow(dead_code)]
pub struct EnrichmentClient {
    api_key: String,
    model: String,
    base_url: String,
}

impl EnrichmentClient {
    /// Create a client using ANTHROPIC_API_KEY from the environment
    pub fn from_env() -> Result<Self, EnrichmentError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| EnrichmentError::NoApiKey)?;
        Ok(Self::with_key(api_key))
    }

    /// Create a client with a specific API key
    pub fn with_key(api_key: String) -> Self {
        Self {
            api_key,
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com/v1/messages".to_string(),
        }
    }

    /// Set the model to use
    pub fn model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Generate enriched recommendations for an audit result
    #[cfg(feature = "ai")]
    pub fn enrich(&self, result: &AuditResult) -> Result<EnrichmentResponse, EnrichmentError> {
        let prompt = super::EnrichmentPromptBuilder::new().build(result);
        let reply = self.send_request(&prompt)?;
        super::parse_response(&reply)
    }

    /// Send a prompt to Claude and return the raw text reply
    #[cfg(feature = "ai")]
    pub fn send_request(&self, prompt: &str) -> Result<String, EnrichmentError> {
        use serde_json::json;

        let client = reqwest::blocking::Client::new();
        let body = json!({
            "model": self.model,
            "max_tokens": 4096,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let response = client
            .post(&self.base_url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .map_err(|e| EnrichmentError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }
        if !status.is_success() {
            let error_text = response.text().unwrap_or_default();
            return Err(EnrichmentError::ApiError(format!("{}: {}", status, error_text)));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| EnrichmentError::InvalidResponse(e.to_string()))?;

        json["content"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|item| item["text"].as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| EnrichmentError::InvalidResponse("no content in response".to_string()))
    }

    /// Stub implementation when the ai feature is disabled
    #[cfg(not(feature = "ai"))]
    pub fn enrich(&self, _result: &AuditResult) -> Result<EnrichmentResponse, EnrichmentError> {
        Err(EnrichmentError::RequestFailed(
            "AI feature not enabled. Rebuild with: cargo build --features ai".to_string(),
        ))
    }

    #[cfg(not(feature = "ai"))]
    pub fn send_request(&self, _prompt: &str) -> Result<String, EnrichmentError> {
        Err(EnrichmentError::RequestFailed(
            "AI feature not enabled. Rebuild with: cargo build --features ai".to_string(),
        ))
    }
}

/// Check if the AI feature is available
pub fn is_ai_available() -> bool {
    cfg!(feature = "ai")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_a_distinct_error() {
        std::env::remove_var("ANTHROPIC_API_KEY");
        let result = EnrichmentClient::from_env();
        assert!(matches!(result, Err(EnrichmentError::NoApiKey)));
    }

    #[test]
    fn error_variants_are_distinguishable_from_empty_results() {
        // "no recommendations found" is a valid empty response, while these
        // are failures the caller must treat as fallback triggers
        let failure = EnrichmentError::InvalidResponse("bad json".to_string());
        assert!(failure.to_string().contains("invalid response"));
        let rate = EnrichmentError::RateLimited;
        assert!(rate.to_string().contains("rate limited"));
    }
}
