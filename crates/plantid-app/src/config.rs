//! Configuration management for plant-identify
//!
//! Config stored at: ~/.config/plant-identify/config.json

use plantid_types::{Error, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted for the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key (also settable via GEMINI_API_KEY or --api-key)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_model() -> String {
    plantid_gemini::DEFAULT_MODEL.to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("config directory not found".to_string()))?
            .join("plant-identify");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Resolve the API key: explicit override, then GEMINI_API_KEY, then
    /// the stored key.
    pub fn resolve_api_key(&self, override_key: Option<&str>) -> Result<String> {
        resolve_api_key_from(
            override_key,
            std::env::var(API_KEY_ENV).ok(),
            self.api_key.as_deref(),
        )
    }
}

fn resolve_api_key_from(
    override_key: Option<&str>,
    env_key: Option<String>,
    stored_key: Option<&str>,
) -> Result<String> {
    if let Some(key) = override_key {
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    if let Some(key) = env_key {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    match stored_key {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => Err(Error::MissingApiKey),
    }
}

/// Mask a stored key down to its first characters for display.
pub fn masked_key(key: Option<&str>) -> String {
    match key {
        Some(key) if !key.is_empty() => {
            let visible: String = key.chars().take(4).collect();
            format!("{}...", visible)
        }
        _ => "(not set)".to_string(),
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Plant Identify Configuration")?;
        writeln!(f, "============================")?;
        writeln!(f)?;
        writeln!(f, "API key:       {}", masked_key(self.api_key.as_deref()))?;
        writeln!(f, "Model:         {}", self.model)?;
        writeln!(f, "Output format: {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:   {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, plantid_gemini::DEFAULT_MODEL);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_round_trip() {
        let config = Config {
            api_key: Some("secret".to_string()),
            model: "gemini-1.5-pro".to_string(),
            output_format: OutputFormat::Json,
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let reloaded: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.api_key.as_deref(), Some("secret"));
        assert_eq!(reloaded.model, "gemini-1.5-pro");
        assert_eq!(reloaded.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_resolve_api_key_precedence() {
        let resolved = resolve_api_key_from(Some("flag"), Some("env".to_string()), Some("stored"));
        assert_eq!(resolved.unwrap(), "flag");

        let resolved = resolve_api_key_from(None, Some("env".to_string()), Some("stored"));
        assert_eq!(resolved.unwrap(), "env");

        let resolved = resolve_api_key_from(None, None, Some("stored"));
        assert_eq!(resolved.unwrap(), "stored");
    }

    #[test]
    fn test_resolve_api_key_skips_empty_values() {
        let resolved = resolve_api_key_from(Some(""), Some(String::new()), Some("stored"));
        assert_eq!(resolved.unwrap(), "stored");
    }

    #[test]
    fn test_resolve_api_key_missing() {
        let resolved = resolve_api_key_from(None, None, None);
        assert!(matches!(resolved, Err(Error::MissingApiKey)));
    }

    #[test]
    fn test_masked_key() {
        assert_eq!(masked_key(None), "(not set)");
        assert_eq!(masked_key(Some("")), "(not set)");
        assert_eq!(masked_key(Some("AIzaSyExample")), "AIza...");
        assert_eq!(masked_key(Some("ab")), "ab...");
    }
}
