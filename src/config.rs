//! Resolved run configuration
//!
//! [`TranslateConfig`] is the bundle the pipeline consumes. The command line
//! builds it (see [`crate::cli`]); library users can build it directly.

use crate::error::{Error, Result};
use crate::mt::{
    AwsTranslateProvider, DeeplProvider, Formality, GoogleTranslateProvider, MachineTranslator,
    MockMode, MockTranslator, Profanity, StringTranslator,
};
use crate::tree::SkipSet;
use encoding_rs::{Encoding, UTF_8};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Seconds to sleep between API calls
pub const SLEEP_BETWEEN_API_CALLS: f64 = 0.01;

/// Default indentation of the output file
pub const INDENTATION_DEFAULT: usize = 2;

/// Default file encoding
pub const ENCODING: &str = "utf-8";

/// Translation service to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Service {
    #[default]
    Deepl,
    Aws,
    Google,
}

impl Service {
    /// Whether every request must name its source language
    pub fn requires_source_locale(self) -> bool {
        matches!(self, Service::Aws)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Deepl => f.write_str("DeepL"),
            Service::Aws => f.write_str("AWS Translate"),
            Service::Google => f.write_str("Google Translate"),
        }
    }
}

/// Credentials for the HTTP providers, usually read from the environment
#[derive(Clone, Default)]
pub struct Credentials {
    pub deepl_auth_key: Option<String>,
    pub deepl_endpoint: Option<String>,
    pub google_api_key: Option<String>,
    /// Overrides the region of the AWS environment
    pub aws_region: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = |key: &Option<String>| key.as_ref().map(|_| "***");
        f.debug_struct("Credentials")
            .field("deepl_auth_key", &masked(&self.deepl_auth_key))
            .field("deepl_endpoint", &self.deepl_endpoint)
            .field("google_api_key", &masked(&self.google_api_key))
            .field("aws_region", &self.aws_region)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub service: Service,
    pub target_locale: String,
    pub source_locale: Option<String>,
    pub glossary: Option<String>,
    /// AWS Translate only
    pub formality: Option<Formality>,
    /// AWS Translate only
    pub profanity: Option<Profanity>,
    pub skip: SkipSet,
    pub delay: Duration,
    pub encoding: &'static Encoding,
    pub indent: usize,
    pub log_translations: bool,
    pub extend: bool,
    pub override_existing: bool,
}

impl TranslateConfig {
    pub fn new(service: Service, target_locale: impl Into<String>) -> Self {
        Self {
            service,
            target_locale: target_locale.into(),
            source_locale: None,
            glossary: None,
            formality: None,
            profanity: None,
            skip: SkipSet::new(),
            delay: Duration::from_secs_f64(SLEEP_BETWEEN_API_CALLS),
            encoding: UTF_8,
            indent: INDENTATION_DEFAULT,
            log_translations: false,
            extend: false,
            override_existing: false,
        }
    }

    /// Check the combination of options before anything touches the network
    pub fn validate(&self) -> Result<()> {
        if self.service.requires_source_locale() && self.source_locale.is_none() {
            return Err(Error::SourceLocaleRequired(self.service));
        }
        if self.glossary.is_some() && self.source_locale.is_none() {
            return Err(Error::GlossaryWithoutSource);
        }
        if self.service != Service::Aws && (self.formality.is_some() || self.profanity.is_some()) {
            warn!(service = %self.service, "formality and profanity only apply to AWS Translate");
        }
        Ok(())
    }

    /// Instantiate the configured provider
    pub async fn provider(&self, credentials: &Credentials) -> Result<Arc<dyn MachineTranslator>> {
        let provider: Arc<dyn MachineTranslator> = match self.service {
            Service::Deepl => {
                let provider = match (&credentials.deepl_auth_key, &credentials.deepl_endpoint) {
                    (Some(key), Some(endpoint)) => {
                        DeeplProvider::with_endpoint(key.clone(), endpoint)?
                    }
                    (Some(key), None) => DeeplProvider::new(key.clone())?,
                    (None, _) => DeeplProvider::from_env()?,
                };
                Arc::new(provider)
            }
            Service::Aws => {
                let provider = AwsTranslateProvider::from_env(credentials.aws_region.clone())
                    .await?
                    .with_formality(self.formality)
                    .with_profanity(self.profanity);
                Arc::new(provider)
            }
            Service::Google => {
                let provider = match &credentials.google_api_key {
                    Some(key) => GoogleTranslateProvider::new(key.clone())?,
                    None => GoogleTranslateProvider::from_env()?,
                };
                Arc::new(provider)
            }
        };
        Ok(provider)
    }

    /// Offline provider for dry runs: every string gets the locale appended
    pub fn mock_provider(&self) -> Arc<dyn MachineTranslator> {
        Arc::new(MockTranslator::new(MockMode::Suffix))
    }

    /// Build the per-run string translator around `provider`
    pub fn string_translator(&self, provider: Arc<dyn MachineTranslator>) -> StringTranslator {
        StringTranslator::new(provider, self.target_locale.clone())
            .with_source_locale(self.source_locale.clone())
            .with_glossary(self.glossary.clone())
            .with_delay(self.delay)
            .with_logging(self.log_translations)
    }
}

/// Convert the `--sleep` seconds into a delay
pub fn delay_from_secs(seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds).map_err(|_| Error::InvalidDelay(seconds))
}

/// Look up an encoding by its WHATWG label (`utf-8`, `latin1`, `windows-1252`...)
///
/// Spellings such as `latin-1` or `utf_8` are accepted by retrying without
/// separators.
pub fn encoding_from_label(label: &str) -> Result<&'static Encoding> {
    let compact: String = label.chars().filter(|c| *c != '-' && *c != '_').collect();
    Encoding::for_label_no_replacement(label.as_bytes())
        .or_else(|| Encoding::for_label_no_replacement(compact.as_bytes()))
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}
