use crate::config::ProviderConfig;
use crate::error::CookmateError;
use crate::providers::{build_client, read_envelope, resolve_api_key, LlmProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

const GOOGLE_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, CookmateError> {
        // Try config first, then fall back to environment variables
        let api_key = resolve_api_key(config, &["GEMINI_API_KEY", "GOOGLE_API_KEY"])?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| GOOGLE_BASE_URL.to_string());

        Ok(GoogleProvider {
            client: build_client(config.timeout)?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        GoogleProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 8192,
        }
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn generate_json(&self, prompt: &str) -> Result<String, CookmateError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{
                    "parts": [{ "text": prompt }]
                }],
                "generationConfig": {
                    "temperature": self.temperature,
                    "maxOutputTokens": self.max_tokens,
                    "responseMimeType": "application/json"
                }
            }))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = read_envelope(self.provider_name(), response).await?;
        candidate_text(&body).ok_or_else(|| CookmateError::Service {
            status,
            message: match body["promptFeedback"]["blockReason"].as_str() {
                Some(reason) => format!("Gemini blocked the prompt ({})", reason),
                None => "Gemini response contained no text".to_string(),
            },
        })
    }
}

/// Concatenated text parts of the first candidate
fn candidate_text(body: &Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
