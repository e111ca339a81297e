//! Text generation for the device's auto-generate button
//!
//! # Architecture
//!
//! ```text
//! Generator (never fails: maps errors to a fallback message)
//!    └── dyn MessageSource
//!          ├── GeminiSource (Google generative language API)
//!          └── test stubs
//! ```
//!
//! Callers only ever see a `String`. Failures are logged here and replaced
//! with [`FALLBACK_MESSAGE`] so the device never shows an error.

mod gemini;

pub use gemini::GeminiSource;

use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Shown when the source fails for any reason
pub const FALLBACK_MESSAGE: &str = "Connection lost. Signal weak.";

/// Shown when the source succeeds but returns no text
pub const EMPTY_MESSAGE: &str = "Error generating message.";

/// Errors a message source can report
#[derive(Debug)]
pub enum GenerateError {
    /// No API key available
    NotConfigured,
    /// Request never got a response
    Network(String),
    /// Provider answered with an error status
    Api { status: u16, message: String },
    /// Response carried no text
    EmptyResponse,
    /// Response body could not be decoded
    Malformed(String),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "API key is missing"),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Api { status, message } => write!(f, "API error ({}): {}", status, message),
            Self::EmptyResponse => write!(f, "Empty response"),
            Self::Malformed(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for GenerateError {}

/// Something that can produce a short pager message
///
/// Returns a boxed future so sources can live behind `Arc<dyn MessageSource>`
/// and be moved into spawned tasks.
pub trait MessageSource: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &'static str;

    fn fetch(&self) -> BoxFuture<'_, Result<String, GenerateError>>;
}

/// Front for a [`MessageSource`] that always yields display text
#[derive(Clone)]
pub struct Generator {
    source: Arc<dyn MessageSource>,
}

impl Generator {
    pub fn new(source: Arc<dyn MessageSource>) -> Self {
        Self { source }
    }

    /// Fetch a message, substituting the fallback on failure
    pub async fn generate(&self) -> String {
        match self.source.fetch().await {
            Ok(text) if !text.trim().is_empty() => {
                tracing::debug!(source = self.source.name(), "message generated");
                text.trim().to_string()
            }
            Ok(_) | Err(GenerateError::EmptyResponse) => {
                tracing::warn!(source = self.source.name(), "generator returned no text");
                EMPTY_MESSAGE.to_string()
            }
            Err(e) => {
                tracing::error!(source = self.source.name(), "Generation failed: {}", e);
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("source", &self.source.name())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedSource;
    use super::*;

    #[tokio::test]
    async fn test_success_passes_text_through() {
        let generator =
            ScriptedSource::new(vec![Ok("  The owls are not what they seem.\n".into())]).generator();
        assert_eq!(generator.generate().await, "The owls are not what they seem.");
    }

    #[tokio::test]
    async fn test_every_failure_becomes_fallback() {
        let generator = ScriptedSource::new(vec![
            Err(GenerateError::NotConfigured),
            Err(GenerateError::Network("timeout".into())),
            Err(GenerateError::Api {
                status: 503,
                message: "overloaded".into(),
            }),
            Err(GenerateError::Malformed("eof".into())),
        ])
        .generator();

        for _ in 0..4 {
            assert_eq!(generator.generate().await, FALLBACK_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_empty_text_uses_empty_message() {
        let generator = ScriptedSource::new(vec![
            Ok("   ".into()),
            Err(GenerateError::EmptyResponse),
        ])
        .generator();

        assert_eq!(generator.generate().await, EMPTY_MESSAGE);
        assert_eq!(generator.generate().await, EMPTY_MESSAGE);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(GenerateError::NotConfigured.to_string(), "API key is missing");
        assert_eq!(
            GenerateError::Api {
                status: 400,
                message: "bad".into()
            }
            .to_string(),
            "API error (400): bad"
        );
    }
}
