//! Shared test fixtures

pub mod mock_editor;
pub mod mock_transport;

use redraft::config::Config;
use redraft::credentials;

/// Config with a usable (obfuscated) key for the given provider
pub fn test_config(provider: &str) -> Config {
    let mut config = Config::default();
    config.selected_provider = provider.to_string();
    config.openai_api_key = credentials::obfuscate("sk-test");
    config.anthropic_api_key = credentials::obfuscate("ant-test");
    config
}
