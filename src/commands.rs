//! Configuration Commands
//!
//! User-initiated settings operations: set an API key, pick a model, switch
//! providers. These are the only writers of the settings file; the request
//! path never writes configuration.

use crate::config::Config;
use crate::credentials;
use crate::error::{RedraftError, RedraftResult};
use crate::providers::ProviderKind;
use tracing::info;

/// Models offered for quick selection, per provider. Free-form model names
/// are accepted too; this list only feeds pickers.
pub const OPENAI_MODELS: &[&str] = &["gpt-4o-mini", "gpt-4o", "gpt-4"];
pub const ANTHROPIC_MODELS: &[&str] = &[
    "claude-3-5-sonnet-20240620",
    "claude-3-opus-20240229",
    "claude-3-haiku-20240307",
];

pub fn known_models(kind: ProviderKind) -> &'static [&'static str] {
    match kind {
        ProviderKind::OpenAi => OPENAI_MODELS,
        ProviderKind::Anthropic => ANTHROPIC_MODELS,
    }
}

/// Store an API key (obfuscated) for the given provider and save
pub fn set_api_key(config: &mut Config, kind: ProviderKind, key: &str) -> RedraftResult<()> {
    if key.trim().is_empty() {
        return Err(RedraftError::Config("API key cannot be empty".into()));
    }

    let stored = credentials::obfuscate(key.trim());
    match kind {
        ProviderKind::OpenAi => config.openai_api_key = stored,
        ProviderKind::Anthropic => config.anthropic_api_key = stored,
    }
    config.save()?;
    info!("{kind} API key updated");
    Ok(())
}

/// Set the model for the given provider and save
pub fn select_model(config: &mut Config, kind: ProviderKind, model: &str) -> RedraftResult<()> {
    if model.trim().is_empty() {
        return Err(RedraftError::Config("Model name cannot be empty".into()));
    }

    match kind {
        ProviderKind::OpenAi => config.openai_model = model.trim().to_string(),
        ProviderKind::Anthropic => config.anthropic_model = model.trim().to_string(),
    }
    config.save()?;
    info!("Selected model: {model}");
    Ok(())
}

/// Make the named provider the active one and save
pub fn switch_provider(config: &mut Config, name: &str) -> RedraftResult<ProviderKind> {
    let kind = ProviderKind::parse(name)?;
    config.selected_provider = kind.as_str().to_string();
    config.save()?;
    info!("Switched to {kind}");
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only the validation paths run here; the success paths write to the
    // real settings file and are covered by the CLI.

    #[test]
    fn test_empty_api_key_rejected() {
        let mut config = Config::default();
        assert!(matches!(
            set_api_key(&mut config, ProviderKind::OpenAi, "   "),
            Err(RedraftError::Config(_))
        ));
        assert!(config.openai_api_key.is_empty());
    }

    #[test]
    fn test_empty_model_rejected() {
        let mut config = Config::default();
        assert!(select_model(&mut config, ProviderKind::Anthropic, "").is_err());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut config = Config::default();
        assert!(matches!(
            switch_provider(&mut config, "grok"),
            Err(RedraftError::UnknownProvider(_))
        ));
        assert_eq!(config.selected_provider, "openai");
    }

    #[test]
    fn test_known_models_nonempty_per_provider() {
        assert!(!known_models(ProviderKind::OpenAi).is_empty());
        assert!(!known_models(ProviderKind::Anthropic).is_empty());
    }
}
