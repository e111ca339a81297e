//! Text generation configuration (Gemini)

use serde::Deserialize;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PROMPT: &str = "Write a short, witty, philosophical, or cryptic pager message. \
It should be under 25 words. Do not include quotes.";

/// Text generation settings
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// API key; never written back to the config file
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Base URL of the generative language API
    pub api_base: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Prompt sent on every request
    pub prompt: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            temperature: 1.2,
            prompt: DEFAULT_PROMPT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Generator settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileGenerator {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub temperature: Option<f32>,
    pub prompt: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl GeneratorConfig {
    /// Create from file config; environment values take precedence
    pub fn from_file(
        file: Option<FileGenerator>,
        env_api_key: Option<String>,
        env_model: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            api_key: env_api_key
                .or(file.api_key)
                .filter(|k| !k.trim().is_empty()),
            model: env_model.or(file.model).unwrap_or(defaults.model),
            api_base: file.api_base.unwrap_or(defaults.api_base),
            temperature: file
                .temperature
                .filter(|t| (0.0..=2.0).contains(t))
                .unwrap_or(defaults.temperature),
            prompt: file
                .prompt
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(defaults.prompt),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }
}
