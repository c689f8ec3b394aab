mod factory;
mod google;
mod open_ai;

pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::config::ProviderConfig;
use crate::error::CookmateError;

/// Unified trait for all generative model services
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Send the prompt, asking for a JSON answer, and return the answer text.
    ///
    /// Makes exactly one request. The text is returned as-is; decoding it is
    /// the caller's job.
    async fn generate_json(&self, prompt: &str) -> Result<String, CookmateError>;
}

/// Read the credential from the config first, then from the given environment
/// variables in order. Blank values count as missing.
fn resolve_api_key(config: &ProviderConfig, env_vars: &[&str]) -> Result<String, CookmateError> {
    config
        .api_key
        .clone()
        .into_iter()
        .chain(env_vars.iter().filter_map(|var| std::env::var(var).ok()))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or_else(|| {
            CookmateError::Configuration(format!(
                "{} not found in config or environment",
                env_vars.join(" / ")
            ))
        })
}

fn build_client(timeout: Option<u64>) -> Result<Client, CookmateError> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Turn an HTTP response into its JSON body, classifying failures.
///
/// 401/403, and 400s that complain about the key, are credential problems.
/// Every other non-success status is a service failure.
async fn read_envelope(provider: &str, response: Response) -> Result<Value, CookmateError> {
    let status = response.status();
    let text = response.text().await?;
    let body: Option<Value> = serde_json::from_str(&text).ok();
    debug!("{} answered {}: {}", provider, status, text);

    if !status.is_success() {
        let message = error_message(body.as_ref(), &text);
        let credential_problem = status.as_u16() == 401
            || status.as_u16() == 403
            || (status.as_u16() == 400 && message.to_lowercase().contains("api key"));

        if credential_problem {
            return Err(CookmateError::Configuration(format!(
                "{} rejected the API key: {}",
                provider, message
            )));
        }
        return Err(CookmateError::Service {
            status: status.as_u16(),
            message,
        });
    }

    body.ok_or_else(|| CookmateError::Service {
        status: status.as_u16(),
        message: format!("{} returned a body that is not JSON", provider),
    })
}

fn error_message(body: Option<&Value>, raw: &str) -> String {
    let from_body = body.and_then(|body| match &body["error"] {
        Value::String(message) => Some(message.clone()),
        error => error["message"].as_str().map(str::to_string),
    });

    from_body.unwrap_or_else(|| {
        let raw = raw.trim();
        if raw.is_empty() {
            "no details".to_string()
        } else {
            raw.chars().take(200).collect()
        }
    })
}
