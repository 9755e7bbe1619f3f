//! Per-run translation cache
//!
//! Maps a source string to the final text produced for it (a translation or
//! the source itself after a failed request). One cache lives for exactly one
//! run; nothing is persisted.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: HashMap<String, String>,
    hits: usize,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `text`, counting a hit when present
    pub fn get(&mut self, text: &str) -> Option<&str> {
        let entry = self.entries.get(text)?;
        self.hits += 1;
        Some(entry.as_str())
    }

    pub fn insert(&mut self, text: &str, result: String) {
        self.entries.insert(text.to_string(), result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}
