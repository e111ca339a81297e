//! Google Gemini message source
//!
//! Calls `models/{model}:generateContent` on the generative language API with
//! a single-turn prompt and joins the text parts of the first candidate.

use super::{GenerateError, MessageSource};
use crate::config::GeneratorConfig;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Pull the human-readable message out of an error body, or keep it raw
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.trim().to_string(),
    }
}

/// Gemini-backed [`MessageSource`]
pub struct GeminiSource {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
    prompt: String,
    temperature: f32,
}

impl GeminiSource {
    /// Build a source from config
    ///
    /// A missing API key is not an error here; every fetch reports
    /// [`GenerateError::NotConfigured`] instead.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerateError::Network(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            tracing::warn!("No Gemini API key configured; auto-generate will use the fallback");
        }

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            prompt: config.prompt.clone(),
            temperature: config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    fn body(&self) -> GenerateRequest<'_> {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: &self.prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        }
    }

    async fn request(&self) -> Result<String, GenerateError> {
        let api_key = self.api_key.as_deref().ok_or(GenerateError::NotConfigured)?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&self.body())
            .send()
            .await
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Malformed(e.to_string()))?;

        parsed.text().ok_or(GenerateError::EmptyResponse)
    }
}

impl MessageSource for GeminiSource {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn fetch(&self) -> BoxFuture<'_, Result<String, GenerateError>> {
        self.request().boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(api_key: Option<&str>) -> GeminiSource {
        let config = GeneratorConfig {
            api_key: api_key.map(str::to_string),
            api_base: "https://example.test/v1beta/".to_string(),
            ..Default::default()
        };
        GeminiSource::new(&config).unwrap()
    }

    #[test]
    fn test_error_message_prefers_envelope() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid.");
        assert_eq!(error_message("  upstream timeout\n"), "upstream timeout");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let source = source(Some("k"));
        assert_eq!(
            source.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let source = source(Some("k"));
        let json = serde_json::to_value(source.body()).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], source.prompt.as_str());
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_response_text_joins_parts() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Static on the line, "}, {"text": "love in the wires."}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.text().as_deref(),
            Some("Static on the line, love in the wires.")
        );
    }

    #[test]
    fn test_response_without_text() {
        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(blocked.text().is_none());

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.text().is_none());
    }

    #[tokio::test]
    async fn test_missing_key_reports_not_configured() {
        let source = source(None);
        assert!(matches!(
            source.fetch().await,
            Err(GenerateError::NotConfigured)
        ));
    }
}
