//! Translate JSON localization bundles with machine translation
//!
//! Every string leaf of a JSON document is sent to a translation provider and
//! the document is rebuilt with the same shape, key order and non-string
//! values. In extend mode only the parts of the source that an existing
//! translation lacks are translated and merged back in.
//!
//! # Workflow Example
//!
//! ```ignore
//! use json_translate::config::{Service, TranslateConfig};
//! use json_translate::mt::DeeplProvider;
//! use json_translate::pipeline::{self, Mode};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = serde_json::json!({"title": "Hello", "id": "header"});
//!
//!     let mut config = TranslateConfig::new(Service::Deepl, "ES");
//!     config.skip = ["id"].into_iter().collect();
//!
//!     let provider = Arc::new(DeeplProvider::from_env()?);
//!     let outcome = pipeline::run(&config, provider, &source, Mode::Fresh).await?;
//!
//!     println!("{}", outcome.document); // {"title":"Hola","id":"header"}
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod files;
pub mod languages;
pub mod mt;
pub mod pipeline;
pub mod tree;

// Integration tests (only available during testing)
#[cfg(test)]
mod integration_tests;

// Re-export main types for convenient access
pub use config::{Credentials, Service, TranslateConfig};
pub use error::{Error, Result};
pub use mt::{
    AwsTranslateProvider, DeeplProvider, GoogleTranslateProvider, MachineTranslator, MockMode, MockTranslator,
    MtError, StringTranslator,
};
pub use pipeline::{Mode, Outcome};
pub use tree::{SkipSet, TreeError, diff, merge, translate_tree};
