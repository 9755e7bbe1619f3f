//! One translation run: (diff) → walk → (merge)

use crate::config::TranslateConfig;
use crate::error::Result;
use crate::mt::{LogStatus, MachineTranslator};
use crate::tree::{diff, is_empty_container, merge, translate_tree};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// How the translated source relates to what is already on disk
#[derive(Debug, Clone)]
pub enum Mode {
    /// Translate the whole source
    Fresh,
    /// Translate only what the existing target lacks and merge it in
    Extend(Value),
}

#[derive(Debug, Clone)]
pub struct Outcome {
    /// Document ready to be saved
    pub document: Value,
    /// Distinct strings sent to the provider
    pub requested: usize,
    pub cache_hits: usize,
    /// Strings kept in the source language after a provider failure
    pub failures: usize,
}

/// Translate `source` according to `config` and `mode`
pub async fn run(
    config: &TranslateConfig,
    provider: Arc<dyn MachineTranslator>,
    source: &Value,
    mode: Mode,
) -> Result<Outcome> {
    config.validate()?;

    let mut translator = config.string_translator(provider);
    info!(
        provider = translator.provider_name(),
        locale = %config.target_locale,
        extend = matches!(mode, Mode::Extend(_)),
        "translating"
    );

    let document = match mode {
        Mode::Fresh => translate_tree(&mut translator, source, &config.skip).await,
        Mode::Extend(mut existing) => {
            let missing = diff(&existing, source)?;
            if is_empty_container(&missing) {
                info!("nothing to translate, the existing translation is complete");
            } else {
                let translated = translate_tree(&mut translator, &missing, &config.skip).await;
                merge(&mut existing, translated);
            }
            existing
        }
    };

    Ok(Outcome {
        document,
        requested: translator.cache().len(),
        cache_hits: translator.cache().hits(),
        failures: translator.log().count(LogStatus::Error),
    })
}
