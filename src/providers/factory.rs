use crate::config::ProviderConfig;
use crate::error::CookmateError;
use crate::providers::{GoogleProvider, LlmProvider, OpenAIProvider};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the provider named in the configuration
    pub fn create(config: &ProviderConfig) -> Result<Box<dyn LlmProvider>, CookmateError> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(CookmateError::Configuration(format!(
                "Provider '{}' is not enabled in configuration",
                config.name
            )));
        }

        match config.name.as_str() {
            "google" | "gemini" => Ok(Box::new(GoogleProvider::new(config)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
            other => Err(CookmateError::Configuration(format!(
                "Unknown provider: {} (available: {})",
                other,
                Self::available_providers().join(", ")
            ))),
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai"]
    }
}
