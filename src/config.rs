use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::Error;

/// Environment variable holding the completion-service credential. The
/// config file never carries the key itself.
pub const API_KEY_ENV: &str = "LLM_API_KEY";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Instruction template sent ahead of the conversation on every
    /// completion request. When absent, the raw history is sent alone.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

fn default_temperature() -> f64 {
    0.3
}

#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    /// Filename offered to the user for the generated spreadsheet.
    #[serde(default = "default_download_name")]
    pub download_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            download_name: default_download_name(),
        }
    }
}

fn default_download_name() -> String {
    "extracted_billing_data.xlsx".to_string()
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [llm]
            base_url = "https://api.example.com/v1"
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.llm.temperature, 0.3);
        assert!(cfg.llm.system_prompt.is_none());
        assert_eq!(cfg.export.download_name, "extracted_billing_data.xlsx");
    }

    #[test]
    fn full_config_overrides_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [llm]
            base_url = "http://localhost:11434/v1"
            model = "qwen3:8b"
            temperature = 0.0
            system_prompt = "You are a billing assistant."

            [export]
            download_name = "billing.xlsx"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.llm.temperature, 0.0);
        assert_eq!(
            cfg.llm.system_prompt.as_deref(),
            Some("You are a billing assistant.")
        );
        assert_eq!(cfg.export.download_name, "billing.xlsx");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
