//! DeepL API provider for machine translation
//!
//! Integrates with the DeepL `v2/translate` endpoint.
//!
//! # Authentication
//!
//! The provider loads the key from the `DEEPL_AUTH_KEY` environment variable.
//! Keys ending in `:fx` belong to the free plan and are sent to
//! `api-free.deepl.com`; all others go to `api.deepl.com`. Set
//! `DEEPL_API_ENDPOINT` to override the endpoint entirely.

use crate::mt::error::{MtError, MtResult};
use crate::mt::response::read_json;
use crate::mt::translator::{MachineTranslator, TranslationRequest, validate_locale};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use url::form_urlencoded;

pub const DEEPL_FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";
pub const DEEPL_PRO_ENDPOINT: &str = "https://api.deepl.com/v2/translate";

#[derive(Debug, Deserialize)]
struct DeeplResponse {
    translations: Option<Vec<DeeplTranslation>>,
}

#[derive(Debug, Deserialize)]
struct DeeplTranslation {
    text: String,
}

/// DeepL API provider
#[derive(Clone)]
pub struct DeeplProvider {
    auth_key: String,
    client: reqwest::Client,
    endpoint: String,
}

impl DeeplProvider {
    /// Create a provider with an explicit key, picking the endpoint from the key's plan
    pub fn new(auth_key: String) -> MtResult<Self> {
        let endpoint = if auth_key.trim_end().ends_with(":fx") {
            DEEPL_FREE_ENDPOINT
        } else {
            DEEPL_PRO_ENDPOINT
        };
        Self::with_endpoint(auth_key, endpoint)
    }

    /// Create a provider talking to a custom endpoint (proxies, tests)
    pub fn with_endpoint(auth_key: String, endpoint: &str) -> MtResult<Self> {
        if auth_key.trim().is_empty() {
            return Err(MtError::Config("DeepL auth key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MtError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            auth_key,
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Create a provider from `DEEPL_AUTH_KEY` (and optionally `DEEPL_API_ENDPOINT`)
    pub fn from_env() -> MtResult<Self> {
        let auth_key = std::env::var("DEEPL_AUTH_KEY").map_err(|_| {
            MtError::Config("DEEPL_AUTH_KEY environment variable not set".to_string())
        })?;

        match std::env::var("DEEPL_API_ENDPOINT") {
            Ok(endpoint) => Self::with_endpoint(auth_key, &endpoint),
            Err(_) => Self::new(auth_key),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form_body(request: &TranslationRequest<'_>) -> String {
        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair("text", request.text);
        form.append_pair("target_lang", &request.target_locale.to_uppercase());
        if let Some(source) = request.source_locale {
            form.append_pair("source_lang", &source.to_uppercase());
        }
        if let Some(glossary) = request.glossary {
            form.append_pair("glossary_id", glossary);
        }
        if request.preserve_formatting {
            form.append_pair("preserve_formatting", "1");
        }
        form.finish()
    }
}

impl std::fmt::Debug for DeeplProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeeplProvider")
            .field("auth_key", &"***")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for DeeplProvider {
    async fn translate(&self, request: &TranslationRequest<'_>) -> MtResult<Vec<String>> {
        validate_locale(request.target_locale)?;
        if let Some(source) = request.source_locale {
            validate_locale(source)?;
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("DeepL-Auth-Key {}", self.auth_key))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Self::form_body(request))
            .send()
            .await?;

        let payload: DeeplResponse = read_json(response).await?;
        let translations = payload.translations.ok_or_else(|| {
            MtError::MalformedResponse("missing 'translations' field".to_string())
        })?;

        Ok(translations.into_iter().map(|t| t.text).collect())
    }

    fn provider_name(&self) -> &str {
        "DeepL"
    }
}
