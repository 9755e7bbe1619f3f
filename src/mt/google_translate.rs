//! Google Translate API provider for machine translation
//!
//! This module integrates with Google Translate API v2.
//!
//! # Authentication
//!
//! The provider loads the API key from the `GOOGLE_TRANSLATE_API_KEY`
//! environment variable. Obtain a key from:
//! https://console.cloud.google.com/
//!
//! Google v2 has no glossary support; a configured glossary is ignored with a
//! debug event. Without a source locale Google detects the language itself.

use crate::mt::error::{MtError, MtResult};
use crate::mt::response::read_json;
use crate::mt::translator::{
    MachineTranslator, TranslationRequest, normalize_locale, validate_locale,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    data: Option<GoogleData>,
}

#[derive(Debug, Deserialize)]
struct GoogleData {
    translations: Option<Vec<GoogleTranslation>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleTranslation {
    translated_text: String,
}

/// Google Translate API v2 provider
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    /// API key for authentication
    api_key: String,
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Base URL for Google Translate API
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Maximum characters per string (30KB per Google Translate API limits)
    const MAX_CHARS_PER_STRING: usize = 30_000;

    /// Create a new GoogleTranslateProvider with an explicit API key
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError)` - If API key is empty or HTTP client creation fails
    pub fn new(api_key: String) -> MtResult<Self> {
        Self::with_base_url(
            api_key,
            "https://translation.googleapis.com/language/translate/v2",
        )
    }

    /// Create a provider against a custom base URL (proxies, tests)
    pub fn with_base_url(api_key: String, base_url: &str) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::Config("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MtError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Create a GoogleTranslateProvider from the `GOOGLE_TRANSLATE_API_KEY` environment variable
    pub fn from_env() -> MtResult<Self> {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY").map_err(|_| {
            MtError::Config("GOOGLE_TRANSLATE_API_KEY environment variable not set".to_string())
        })?;

        Self::new(api_key)
    }

    fn request_body(request: &TranslationRequest<'_>) -> serde_json::Value {
        let mut body = json!({
            "q": [request.text],
            "target": normalize_locale(request.target_locale),
            "format": "text"
        });
        if let Some(source) = request.source_locale {
            body["source"] = json!(normalize_locale(source));
        }
        body
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslateProvider {
    async fn translate(&self, request: &TranslationRequest<'_>) -> MtResult<Vec<String>> {
        validate_locale(request.target_locale)?;
        if let Some(source) = request.source_locale {
            validate_locale(source)?;
        }

        if request.text.chars().count() > Self::MAX_CHARS_PER_STRING {
            return Err(MtError::Translation(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_STRING
            )));
        }

        if let Some(glossary) = request.glossary {
            debug!(glossary, "Google Translate v2 has no glossaries, ignoring");
        }

        let url = format!("{}?key={}", self.base_url, self.api_key);
        let response = self
            .client
            .post(&url)
            .json(&Self::request_body(request))
            .send()
            .await?;

        let payload: GoogleResponse = read_json(response).await?;
        let translations = payload
            .data
            .and_then(|data| data.translations)
            .ok_or_else(|| {
                MtError::MalformedResponse("missing 'data.translations' array".to_string())
            })?;

        Ok(translations.into_iter().map(|t| t.translated_text).collect())
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}
