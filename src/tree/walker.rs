//! Recursive translation of a JSON document
//!
//! The walk is a structural copy of the input in which every non-empty string
//! leaf is replaced by its translation. It is sequential and depth-first:
//! object members in insertion order, array items in positional order, so the
//! provider sees strings in document order.
//!
//! Skipping is shallow and applies to object keys only. A skipped member is
//! copied verbatim, whatever it contains.

use crate::mt::StringTranslator;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

/// Object keys whose values are never translated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet(HashSet<String>);

impl SkipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SkipSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

type WalkFuture<'a> = Pin<Box<dyn Future<Output = Value> + Send + 'a>>;

/// Translate every string leaf of `value`
///
/// Numbers, booleans and nulls are returned unchanged, empty strings are
/// never sent to the provider.
pub fn translate_tree<'a>(
    translator: &'a mut StringTranslator,
    value: &'a Value,
    skip: &'a SkipSet,
) -> WalkFuture<'a> {
    Box::pin(async move {
        match value {
            Value::Object(map) => {
                let mut translated = Map::with_capacity(map.len());
                for (key, child) in map {
                    let child = if skip.contains(key) {
                        child.clone()
                    } else {
                        translate_tree(&mut *translator, child, skip).await
                    };
                    translated.insert(key.clone(), child);
                }
                Value::Object(translated)
            }
            Value::Array(items) => {
                let mut translated = Vec::with_capacity(items.len());
                for item in items {
                    translated.push(translate_tree(&mut *translator, item, skip).await);
                }
                Value::Array(translated)
            }
            Value::String(text) => Value::String(translator.translate_string(text).await),
            Value::Bool(_) | Value::Number(_) | Value::Null => value.clone(),
        }
    })
}
