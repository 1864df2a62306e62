//! Provider Adapters
//!
//! Maps an abstract transformation request onto a concrete HTTP request for
//! a specific language-model backend, and extracts the result text from the
//! backend's response shape.

pub mod anthropic;
pub mod openai;

use crate::config::Config;
use crate::credentials;
use crate::error::{RedraftError, RedraftResult};
use std::fmt;
use std::sync::Arc;

// Re-export main types
pub use anthropic::AnthropicAdapter;
pub use openai::OpenAiAdapter;

/// Supported language-model backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    /// Parse a provider name as stored in the settings file
    pub fn parse(name: &str) -> RedraftResult<Self> {
        match name {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(RedraftError::UnknownProvider(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a single request needs to know about the selected backend.
///
/// Built fresh from the settings at dispatch time; never cached across
/// requests. Holds the revealed (plaintext) API key.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    pub kind: ProviderKind,
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    /// Anthropic only
    pub max_tokens: u32,
    /// Anthropic only
    pub system_prompt: String,
}

impl ProviderProfile {
    /// Resolve the active provider from the settings.
    ///
    /// Fails before any network activity if the provider is unknown or its
    /// key is missing.
    pub fn from_config(config: &Config) -> RedraftResult<Self> {
        let kind = ProviderKind::parse(&config.selected_provider)?;

        let (stored_key, model, endpoint) = match kind {
            ProviderKind::OpenAi => (
                &config.openai_api_key,
                &config.openai_model,
                &config.openai_endpoint,
            ),
            ProviderKind::Anthropic => (
                &config.anthropic_api_key,
                &config.anthropic_model,
                &config.anthropic_endpoint,
            ),
        };

        if stored_key.is_empty() {
            return Err(RedraftError::MissingApiKey(kind.to_string()));
        }

        Ok(Self {
            kind,
            api_key: credentials::reveal(stored_key)?,
            model: model.clone(),
            endpoint: endpoint.clone(),
            max_tokens: config.anthropic_max_tokens,
            system_prompt: config.anthropic_system_prompt.clone(),
        })
    }
}

/// A fully-formed HTTP request, ready for the background executor
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: serde_json::Value,
}

/// Trait for provider backends
pub trait ProviderAdapter: Send + Sync {
    /// Provider this adapter speaks for
    fn kind(&self) -> ProviderKind;

    /// Build the outbound POST for the given prompt. Pure: no I/O.
    fn build_request(&self, prompt: &str, profile: &ProviderProfile) -> RedraftResult<ApiRequest>;

    /// Extract the result text from a raw response body
    fn extract_text(&self, body: &str) -> RedraftResult<String>;
}

/// Factory to create the adapter for the selected provider
pub fn create_adapter(kind: ProviderKind) -> Arc<dyn ProviderAdapter> {
    match kind {
        ProviderKind::OpenAi => Arc::new(OpenAiAdapter),
        ProviderKind::Anthropic => Arc::new(AnthropicAdapter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys() -> Config {
        let mut config = Config::default();
        config.openai_api_key = credentials::obfuscate("sk-test");
        config.anthropic_api_key = credentials::obfuscate("ant-test");
        config
    }

    #[test]
    fn test_parse_known_providers() {
        assert_eq!(ProviderKind::parse("openai").unwrap(), ProviderKind::OpenAi);
        assert_eq!(
            ProviderKind::parse("anthropic").unwrap(),
            ProviderKind::Anthropic
        );
    }

    #[test]
    fn test_parse_unknown_provider_fails() {
        assert!(matches!(
            ProviderKind::parse("mistral"),
            Err(RedraftError::UnknownProvider(name)) if name == "mistral"
        ));
    }

    #[test]
    fn test_profile_reveals_key_for_selected_provider() {
        let mut config = config_with_keys();
        config.selected_provider = "anthropic".to_string();

        let profile = ProviderProfile::from_config(&config).unwrap();
        assert_eq!(profile.kind, ProviderKind::Anthropic);
        assert_eq!(profile.api_key, "ant-test");
        assert_eq!(profile.model, config.anthropic_model);
    }

    #[test]
    fn test_profile_rejects_missing_key() {
        let mut config = config_with_keys();
        config.openai_api_key = String::new();

        assert!(matches!(
            ProviderProfile::from_config(&config),
            Err(RedraftError::MissingApiKey(_))
        ));
    }
}
