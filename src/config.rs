use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
///
/// API keys are stored obfuscated (see [`crate::credentials`]); an empty
/// string means the key is unset. The settings file is read fresh at
/// dispatch time and written only by the explicit configuration commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Provider selection
    pub selected_provider: String,

    // OpenAI
    pub openai_model: String,
    pub openai_api_key: String,
    pub openai_endpoint: String,

    // Anthropic
    pub anthropic_model: String,
    pub anthropic_api_key: String,
    pub anthropic_endpoint: String,
    pub anthropic_max_tokens: u32,
    pub anthropic_system_prompt: String,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selected_provider: "openai".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            openai_api_key: "".to_string(),
            openai_endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            anthropic_model: "claude-3-5-sonnet-20240620".to_string(),
            anthropic_api_key: "".to_string(),
            anthropic_endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            anthropic_max_tokens: 1024,
            anthropic_system_prompt: "You are an English language expert.".to_string(),
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from file or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from a specific path (tests use a temp dir)
    pub fn load_from(config_path: &PathBuf) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            match serde_json::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    // Graceful degradation: log warning and use defaults
                    tracing::warn!("Config file corrupted or invalid, using defaults: {}", e);
                    // Backup corrupt file for debugging
                    let backup_path = config_path.with_extension("json.corrupt");
                    let _ = std::fs::rename(config_path, &backup_path);
                    Ok(Self::default())
                }
            }
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    /// Save config to a specific path
    pub fn save_to(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("redraft")
        .join("config.json")
}
