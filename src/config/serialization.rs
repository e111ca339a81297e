//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    ///
    /// The API key is deliberately left out; it belongs in the environment.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# fax-beeper configuration

# Milliseconds between characters when a card types itself out
typewriter_interval_ms = {typewriter}

# Redraw tick in milliseconds
tick_rate_ms = {tick}

# Auto-generate (Gemini). Set GEMINI_API_KEY (or API_KEY) in the environment.
[generator]
model = {model:?}
api_base = {api_base:?}
temperature = {temperature:?}
prompt = {prompt:?}
timeout_secs = {timeout}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level:?}
# JSON file logging (in addition to the in-app log buffer)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix:?}
"#,
            typewriter = self.typewriter_interval_ms,
            tick = self.tick_rate_ms,
            model = self.generator.model,
            api_base = self.generator.api_base,
            temperature = self.generator.temperature,
            prompt = self.generator.prompt,
            timeout = self.generator.timeout_secs,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
