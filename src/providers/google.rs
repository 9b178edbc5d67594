/*!
 * Google Translate client.
 *
 * Talks to the keyless `translate_a/single` endpoint with `client=gtx`.
 * The reply is a nested JSON array; the translated text is the first
 * element of each sentence entry under `[0]`.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

/// Default endpoint of the public Google translation API
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Client for Google's `translate_a/single` endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    /// Endpoint URL without query parameters
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

impl GoogleTranslate {
    /// Create a new client for `endpoint` with a request timeout
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Build the request URL; `text` is percent-encoded into `q`
    pub fn request_url(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
    ) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", source_language),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", self.endpoint, e)))
    }

    /// Extract the translation from a response body.
    ///
    /// The body is a nested array whose `[0][0][0]` is the translated text.
    /// Longer inputs come back split into sentences (`[0][i][0]`), which are
    /// joined in order.
    pub fn parse_response(body: &str) -> Result<String, ProviderError> {
        let json: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Response is not JSON: {}", e)))?;

        let sentences = json
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Missing sentence array at [0]".to_string()))?;

        let first = sentences
            .first()
            .and_then(|s| s.get(0))
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::ParseError("Missing translated text at [0][0][0]".to_string()))?;

        let mut translated = first.to_string();
        for sentence in sentences.iter().skip(1) {
            if let Some(text) = sentence.get(0).and_then(Value::as_str) {
                translated.push_str(text);
            }
        }

        Ok(translated)
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
    ) -> Result<String, ProviderError> {
        let url = self.request_url(source_language, target_language, text)?;
        debug!("Requesting translation {} -> {} ({} chars)", source_language, target_language, text.chars().count());

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Translation API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Self::parse_response(&body)
    }
}
