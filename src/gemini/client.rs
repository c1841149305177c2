use reqwest::Client;
use tracing::{debug, warn};

use super::types::{ApiError, Content, GenerateContentRequest, GenerateContentResponse, Part};
use crate::config::ApiKey;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const SUMMARY_INSTRUCTION: &str = "Summarize these news headlines for a natural narration:";

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("API quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Gemini returned no text (finish reason: {0})")]
    EmptyResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Turns headline text into narration prose.
/// Implemented by `GeminiClient` for production; fakes used in pipeline tests.
pub trait Summarize {
    async fn summarize(&self, headlines: &str) -> Result<String, GeminiError>;
}

#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(http: Client, api_key: ApiKey, model: &str) -> Self {
        Self {
            http,
            api_key,
            model: model.to_string(),
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey::new("test-key"),
            model: crate::config::DEFAULT_MODEL.to_string(),
            base_url: base_url.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
                role: Some("user".to_string()),
            }],
        };

        debug_assert!(
            url.starts_with("https://") || cfg!(test),
            "API key must only be sent over HTTPS"
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Gemini API rate limited");
            return Err(GeminiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Ok(body) = serde_json::from_str::<GenerateContentResponse>(&text)
                && let Some(err) = &body.error
            {
                let classified = classify_api_error(err);
                warn!(error = %classified, "Gemini API error");
                return Err(classified);
            }
            let end = text.floor_char_boundary(200);
            warn!(status = %status, "Gemini API error (no structured body)");
            return Err(GeminiError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}: {}", &text[..end]),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        debug!(model = %self.model, "gemini generation complete");

        if let Some(err) = &body.error {
            let classified = classify_api_error(err);
            warn!(error = %classified, "Gemini API error in 200 response");
            return Err(classified);
        }

        Ok(body)
    }
}

impl Summarize for GeminiClient {
    async fn summarize(&self, headlines: &str) -> Result<String, GeminiError> {
        let prompt = summary_prompt(headlines);
        let response = self.generate(&prompt).await?;
        response.first_text().ok_or_else(|| {
            let reason = response.finish_reason().unwrap_or("none").to_string();
            warn!(%reason, "Gemini returned empty answer (safety filter or empty response)");
            GeminiError::EmptyResponse(reason)
        })
    }
}

pub fn summary_prompt(headlines: &str) -> String {
    format!("{SUMMARY_INSTRUCTION}\n{headlines}")
}

fn classify_api_error(err: &ApiError) -> GeminiError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());

    match err.code {
        Some(429) => GeminiError::RateLimited,
        Some(403) => GeminiError::QuotaExhausted(message),
        Some(code) => GeminiError::Api { code, message },
        None => GeminiError::Api {
            code: 0,
            message: format!("Unknown error (no status code): {message}"),
        },
    }
}
