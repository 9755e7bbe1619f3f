//! Single-string translation with caching, pacing and graceful degradation
//!
//! [`StringTranslator`] wraps a [`MachineTranslator`] for the duration of one
//! run. For every non-empty string it:
//!
//! 1. answers from the per-run cache when possible (no sleep, no request),
//! 2. otherwise sleeps the configured inter-call delay,
//! 3. asks the provider, keeping the first candidate when several come back,
//! 4. falls back to the source text when the provider fails,
//! 5. caches whatever text it returned.
//!
//! A failing string never aborts the run.

use crate::mt::cache::TranslationCache;
use crate::mt::error::{MtError, MtResult};
use crate::mt::log::{LogStatus, TranslationLog};
use crate::mt::translator::{MachineTranslator, TranslationRequest};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct StringTranslator {
    provider: Arc<dyn MachineTranslator>,
    target_locale: String,
    source_locale: Option<String>,
    glossary: Option<String>,
    delay: Duration,
    cache: TranslationCache,
    log: TranslationLog,
}

impl StringTranslator {
    /// Create a translator with no pacing delay and logging disabled
    pub fn new(provider: Arc<dyn MachineTranslator>, target_locale: impl Into<String>) -> Self {
        Self {
            provider,
            target_locale: target_locale.into(),
            source_locale: None,
            glossary: None,
            delay: Duration::ZERO,
            cache: TranslationCache::new(),
            log: TranslationLog::new(false),
        }
    }

    pub fn with_source_locale(mut self, source_locale: Option<String>) -> Self {
        self.source_locale = source_locale;
        self
    }

    pub fn with_glossary(mut self, glossary: Option<String>) -> Self {
        self.glossary = glossary;
        self
    }

    /// Wait before every provider call; cache hits are never delayed
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log = TranslationLog::new(enabled);
        self
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn log(&self) -> &TranslationLog {
        &self.log
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Translate one string, returning the source text when the provider fails
    pub async fn translate_string(&mut self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let cached = self.cache.get(text).map(str::to_owned);
        if let Some(hit) = cached {
            self.log
                .record(LogStatus::Warning, text, &hit, Some("cached".to_string()));
            return hit;
        }

        let result = match self.try_translate(text).await {
            Ok((translation, surplus)) if surplus.is_empty() => {
                self.log.record(LogStatus::Success, text, &translation, None);
                translation
            }
            Ok((translation, surplus)) => {
                warn!(
                    text,
                    candidates = surplus.len() + 1,
                    "provider returned several translations, keeping the first"
                );
                self.log.record(
                    LogStatus::Warning,
                    text,
                    &translation,
                    Some(format!("more than 1 translation: {:?}", surplus)),
                );
                translation
            }
            Err(err) => {
                warn!(
                    provider = self.provider.provider_name(),
                    text,
                    error = %err,
                    "translation failed, keeping source text"
                );
                self.log
                    .record(LogStatus::Error, text, text, Some(err.to_string()));
                text.to_string()
            }
        };

        self.cache.insert(text, result.clone());
        result
    }

    /// Pace, call the provider and split the answer into the chosen
    /// translation and any surplus candidates
    pub async fn try_translate(&self, text: &str) -> MtResult<(String, Vec<String>)> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let request = TranslationRequest::new(text, &self.target_locale)
            .with_source_locale(self.source_locale.as_deref())
            .with_glossary(self.glossary.as_deref());

        debug!(
            provider = self.provider.provider_name(),
            locale = %self.target_locale,
            text,
            "requesting translation"
        );
        let mut candidates = self.provider.translate(&request).await?.into_iter();
        let first = candidates.next().ok_or_else(|| {
            MtError::MalformedResponse("no translation candidates".to_string())
        })?;

        Ok((first, candidates.collect()))
    }
}

impl std::fmt::Debug for StringTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringTranslator")
            .field("provider", &self.provider.provider_name())
            .field("target_locale", &self.target_locale)
            .field("source_locale", &self.source_locale)
            .field("glossary", &self.glossary)
            .field("delay", &self.delay)
            .field("cached", &self.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::mock::{MockMode, MockTranslator};
    use pretty_assertions::assert_eq;

    fn translator(mock: &Arc<MockTranslator>) -> StringTranslator {
        StringTranslator::new(mock.clone(), "fr").with_logging(true)
    }

    #[tokio::test]
    async fn test_empty_string_is_not_sent() {
        let mock = Arc::new(MockTranslator::new(MockMode::Suffix));
        let mut translator = translator(&mock);
        assert_eq!(translator.translate_string("").await, "");
        assert_eq!(mock.call_count(), 0);
        assert!(translator.cache().is_empty());
        assert!(translator.log().entries().is_empty());
    }

    #[tokio::test]
    async fn test_success() {
        let mock = Arc::new(MockTranslator::new(MockMode::Suffix));
        let mut translator = translator(&mock);
        assert_eq!(translator.translate_string("hello").await, "hello_fr");
        assert_eq!(translator.log().entries()[0].to_string(), "hello -> hello_fr");
    }

    #[tokio::test]
    async fn test_repeated_string_costs_one_call() {
        let mock = Arc::new(MockTranslator::new(MockMode::Suffix));
        let mut translator = translator(&mock);

        let first = translator.translate_string("hello").await;
        let second = translator.translate_string("hello").await;

        assert_eq!(first, second);
        assert_eq!(mock.call_count(), 1);
        assert_eq!(translator.cache().hits(), 1);
        assert_eq!(
            translator.log().entries()[1].to_string(),
            "warning: hello -> hello_fr (cached)"
        );
    }

    #[tokio::test]
    async fn test_cache_hit_skips_delay() {
        let mock = Arc::new(MockTranslator::new(MockMode::Suffix));
        let mut translator = translator(&mock).with_delay(Duration::from_millis(200));
        translator.translate_string("hello").await;

        let start = std::time::Instant::now();
        translator.translate_string("hello").await;
        assert!(start.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_delay_applied_before_call() {
        let mock = Arc::new(MockTranslator::new(MockMode::Suffix));
        let mut translator = translator(&mock).with_delay(Duration::from_millis(20));
        let start = std::time::Instant::now();
        translator.translate_string("hello").await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_transport_error_keeps_source() {
        let mock = Arc::new(MockTranslator::new(MockMode::Error(MtError::Transport(456))));
        let mut translator = translator(&mock);

        assert_eq!(translator.translate_string("hello").await, "hello");
        let entry = &translator.log().entries()[0];
        assert_eq!(entry.status, LogStatus::Error);
        assert_eq!(entry.to_string(), "error: hello -> hello (response status: 456)");
    }

    #[tokio::test]
    async fn test_malformed_response_keeps_source() {
        let mock = Arc::new(MockTranslator::new(MockMode::Error(
            MtError::MalformedResponse("missing 'translations' field".to_string()),
        )));
        let mut translator = translator(&mock);
        assert_eq!(translator.translate_string("hello").await, "hello");
        assert_eq!(translator.log().count(LogStatus::Error), 1);
    }

    #[tokio::test]
    async fn test_empty_candidate_list_is_malformed() {
        let mock = Arc::new(MockTranslator::new(MockMode::Candidates(vec![])));
        let translator = translator(&mock);
        assert!(matches!(
            translator.try_translate("hello").await,
            Err(MtError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_failure_is_cached() {
        let mock = Arc::new(MockTranslator::new(MockMode::Error(MtError::Transport(500))));
        let mut translator = translator(&mock);
        translator.translate_string("hello").await;
        translator.translate_string("hello").await;
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_multiple_candidates_take_first() {
        let mock = Arc::new(MockTranslator::new(MockMode::Candidates(vec![
            "bonjour".to_string(),
            "salut".to_string(),
        ])));
        let mut translator = translator(&mock);

        assert_eq!(translator.translate_string("hello").await, "bonjour");
        let entry = &translator.log().entries()[0];
        assert_eq!(entry.status, LogStatus::Warning);
        assert!(entry.detail.as_deref().unwrap().contains("salut"));
    }

    #[tokio::test]
    async fn test_request_carries_locales_and_glossary() {
        let mock = Arc::new(MockTranslator::new(MockMode::Suffix));
        let translator = StringTranslator::new(mock.clone(), "DE")
            .with_source_locale(Some("EN".to_string()))
            .with_glossary(Some("gl".to_string()));
        let (text, surplus) = translator.try_translate("hi").await.unwrap();
        assert_eq!(text, "hi_DE");
        assert!(surplus.is_empty());
    }
}
