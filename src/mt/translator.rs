//! Machine Translation trait and utilities
//!
//! This module defines the `MachineTranslator` trait for provider abstraction,
//! enabling support for different MT backends (DeepL, Google Translate, mock)
//! without coupling the tree walk to any specific implementation.
//!
//! Providers only perform the request. Caching, pacing and the
//! degrade-to-source policy live in [`StringTranslator`](crate::mt::StringTranslator).
//!
//! # Example
//!
//! ```ignore
//! use json_translate::mt::{DeeplProvider, MachineTranslator, TranslationRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = DeeplProvider::from_env()?;
//!     let request = TranslationRequest::new("Hello, world!", "ES");
//!     let candidates = provider.translate(&request).await?;
//!     println!("{}", candidates[0]); // "¡Hola, mundo!"
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use async_trait::async_trait;

/// Everything a provider needs to translate one string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationRequest<'a> {
    pub text: &'a str,
    pub target_locale: &'a str,
    pub source_locale: Option<&'a str>,
    pub glossary: Option<&'a str>,
    /// Ask the provider to keep whitespace, punctuation and casing as-is
    pub preserve_formatting: bool,
}

impl<'a> TranslationRequest<'a> {
    pub fn new(text: &'a str, target_locale: &'a str) -> Self {
        Self {
            text,
            target_locale,
            source_locale: None,
            glossary: None,
            preserve_formatting: true,
        }
    }

    pub fn with_source_locale(mut self, source_locale: Option<&'a str>) -> Self {
        self.source_locale = source_locale;
        self
    }

    pub fn with_glossary(mut self, glossary: Option<&'a str>) -> Self {
        self.glossary = glossary;
        self
    }
}

/// Generic trait for machine translation providers
///
/// Implementations of this trait handle the actual translation work,
/// whether through an API (DeepL, Google Translate) or deterministic logic (Mock).
///
/// All methods are async to support I/O-bound operations like network requests.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Every translation candidate the provider returned,
    ///   in provider order. An empty list is treated as a malformed response
    ///   by the caller.
    /// * `Err(MtError)` - Transport, network or payload failures
    async fn translate(&self, request: &TranslationRequest<'_>) -> MtResult<Vec<String>>;

    /// Get the name of this translation provider
    ///
    /// Used for logging and debugging to identify which provider handled a translation.
    fn provider_name(&self) -> &str;
}

/// Canonicalize the casing of a locale code
///
/// The language is lowercased and a two letter region is uppercased. Other
/// subtags (scripts) are kept as given, and `_` becomes `-`:
/// - `EN` → `en`
/// - `pt_br` → `pt-BR`
/// - `zh-Hant` → `zh-Hant`
pub fn normalize_locale(locale: &str) -> String {
    let mut subtags = locale.split(['-', '_']);
    let mut normalized = subtags.next().unwrap_or_default().to_lowercase();
    for subtag in subtags {
        normalized.push('-');
        if subtag.len() == 2 {
            normalized.push_str(&subtag.to_uppercase());
        } else {
            normalized.push_str(subtag);
        }
    }
    normalized
}

/// Validate that a locale code is in acceptable format
///
/// Checks that the locale code contains only alphanumeric characters,
/// hyphens, and underscores (following ISO 639 conventions).
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::Config("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::Config(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}
