//! Mock Machine Translator for testing
//!
//! This module provides a deterministic, API-free translator for testing
//! the tree walk without requiring API keys or network access. It also backs
//! the `--mock` command line flag.
//!
//! # Example
//!
//! ```ignore
//! use json_translate::mt::{MachineTranslator, MockMode, MockTranslator, TranslationRequest};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate(&TranslationRequest::new("hello", "fr")).await.unwrap();
//!     assert_eq!(result, vec!["hello_fr"]);
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, TranslationRequest};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append locale suffix: "hello" → "hello_fr"
    Suffix,

    /// Use predefined mappings for realistic translations
    /// (text, target_locale) → translation, falling back to `Suffix`
    Mappings(HashMap<(String, String), String>),

    /// Answer every request with the same candidate list
    Candidates(Vec<String>),

    /// Fail every request with the given error
    Error(MtError),

    /// Fail only for the listed texts, `Suffix` for everything else
    FailOn(Vec<String>, MtError),

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
///
/// Every call is counted and the requested texts are recorded in call order,
/// so tests can assert on caching and traversal order.
#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self::with_delay(mode, 0)
    }

    /// Create a MockTranslator with simulated network delay
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Number of `translate` calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Texts received so far, in call order
    pub fn requested_texts(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|texts| texts.clone())
            .unwrap_or_default()
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn apply_translation(&self, text: &str, target: &str) -> MtResult<Vec<String>> {
        let suffixed = || format!("{}_{}", text, target);

        match &self.mode {
            MockMode::Suffix => Ok(vec![suffixed()]),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(vec![map.get(&key).cloned().unwrap_or_else(suffixed)])
            }
            MockMode::Candidates(candidates) => Ok(candidates.clone()),
            MockMode::Error(err) => Err(err.clone()),
            MockMode::FailOn(texts, err) if texts.iter().any(|t| t == text) => Err(err.clone()),
            MockMode::FailOn(..) => Ok(vec![suffixed()]),
            MockMode::NoOp => Ok(vec![text.to_string()]),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(&self, request: &TranslationRequest<'_>) -> MtResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(request.text.to_string());
        }

        self.apply_delay().await;
        self.apply_translation(request.text, request.target_locale)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
