//! Configuration for the beeper
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/fax-beeper/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod generator;
mod logging;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use generator::{FileGenerator, GeneratorConfig};
pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_TYPEWRITER_MS: u64 = 50;
const DEFAULT_TICK_RATE_MS: u64 = 100;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Milliseconds between revealed characters on a fresh card
    pub typewriter_interval_ms: u64,

    /// Redraw tick for toasts and the busy spinner
    pub tick_rate_ms: u64,

    /// Text generation settings
    pub generator: GeneratorConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            typewriter_interval_ms: DEFAULT_TYPEWRITER_MS,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            generator: GeneratorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub typewriter_interval_ms: Option<u64>,
    pub tick_rate_ms: Option<u64>,

    /// Optional [generator] section
    pub generator: Option<FileGenerator>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/fax-beeper/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("fax-beeper").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load the config file if it exists
    ///
    /// A file that exists but cannot be read or parsed is an error: a broken
    /// config should fail fast rather than silently fall back to defaults.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Invalid config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn load() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let typewriter_interval_ms = env("FAX_BEEPER_TYPEWRITER_MS")
            .and_then(|v| v.parse().ok())
            .or(file.typewriter_interval_ms)
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_TYPEWRITER_MS);

        let tick_rate_ms = file
            .tick_rate_ms
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_TICK_RATE_MS);

        // API key: GEMINI_API_KEY > API_KEY > file
        let api_key = env("GEMINI_API_KEY").or_else(|| env("API_KEY"));
        let generator = GeneratorConfig::from_file(file.generator, api_key, env("FAX_BEEPER_MODEL"));

        let logging = LoggingConfig::from_file(file.logging, env("FAX_BEEPER_LOG_LEVEL"));

        Self {
            typewriter_interval_ms,
            tick_rate_ms,
            generator,
            logging,
        }
    }
}
