//! Command line interface
//!
//! ```text
//! json-translate locales/en.json es --skip id url --log
//! json-translate locales/ de --service google --extend
//! json-translate locales/en.json fr --service aws --source-locale en --formality formal
//! ```

use crate::config::{
    Credentials, ENCODING, INDENTATION_DEFAULT, SLEEP_BETWEEN_API_CALLS, Service, TranslateConfig,
    delay_from_secs, encoding_from_label,
};
use crate::files;
use crate::languages::{source_lang_code, target_lang_code};
use crate::mt::{Formality, Profanity};
use crate::pipeline::{self, Mode};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "json-translate",
    version,
    about = "Translate json files using machine translation APIs",
    after_help = "Credentials are read from DEEPL_AUTH_KEY / GOOGLE_TRANSLATE_API_KEY and the AWS environment, also from a .env file."
)]
pub struct Arguments {
    /// Folder or file to look for translation source
    pub file: PathBuf,

    /// Language target to translate
    pub locale: String,

    /// Translation service to use
    #[arg(short = 's', long, value_enum, default_value_t = Service::Deepl)]
    pub service: Service,

    /// Language translating from (required for glossary and AWS)
    #[arg(long = "source-locale", visible_alias = "sl")]
    pub source_locale: Option<String>,

    /// ID of glossary to use when translating
    #[arg(short, long)]
    pub glossary: Option<String>,

    /// Formality of the translation (AWS only)
    #[arg(long, value_enum)]
    pub formality: Option<Formality>,

    /// Mask profane words (AWS only)
    #[arg(long, value_enum)]
    pub profanity: Option<Profanity>,

    /// Extend an existing translation file
    #[arg(short, long)]
    pub extend: bool,

    /// Override existing translation file
    #[arg(long = "override")]
    pub override_existing: bool,

    /// Output file name
    #[arg(short, long)]
    pub output: Option<String>,

    /// Indentation spaces
    #[arg(short, long, default_value_t = INDENTATION_DEFAULT)]
    pub indent: usize,

    /// Sleep time between API calls, in seconds
    #[arg(long, default_value_t = SLEEP_BETWEEN_API_CALLS)]
    pub sleep: f64,

    /// Keys to skip
    #[arg(long, num_args = 1..)]
    pub skip: Vec<String>,

    /// File encoding
    #[arg(long, default_value = ENCODING)]
    pub encoding: String,

    /// Print translation results
    #[arg(long)]
    pub log: bool,

    /// Use an offline translator that appends the locale to every string
    #[arg(long)]
    pub mock: bool,

    #[arg(long, env = "DEEPL_AUTH_KEY", hide_env_values = true)]
    pub deepl_auth_key: Option<String>,

    #[arg(long, env = "DEEPL_API_ENDPOINT")]
    pub deepl_endpoint: Option<String>,

    #[arg(long, env = "GOOGLE_TRANSLATE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    #[arg(long, env = "AWS_REGION")]
    pub aws_region: Option<String>,
}

impl Arguments {
    /// Resolve the arguments into a validated configuration
    pub fn to_config(&self) -> anyhow::Result<TranslateConfig> {
        let target_locale = target_lang_code(self.service, &self.locale)?;

        let mut config = TranslateConfig::new(self.service, target_locale);
        config.source_locale = self
            .source_locale
            .as_deref()
            .map(|locale| source_lang_code(self.service, locale))
            .transpose()?;
        config.formality = self.formality;
        config.profanity = self.profanity;
        config.glossary = self.glossary.clone();
        config.skip = self.skip.iter().cloned().collect();
        config.delay = delay_from_secs(self.sleep)?;
        config.encoding = encoding_from_label(&self.encoding)?;
        config.indent = self.indent;
        config.log_translations = self.log;
        config.extend = self.extend;
        config.override_existing = self.override_existing;
        config.validate()?;

        Ok(config)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            deepl_auth_key: self.deepl_auth_key.clone(),
            deepl_endpoint: self.deepl_endpoint.clone(),
            google_api_key: self.google_api_key.clone(),
            aws_region: self.aws_region.clone(),
        }
    }
}

/// Run one translation from the command line
///
/// Every check that can fail without the network (input, output, extend
/// target, credentials) runs before the first provider call.
pub async fn run_cli(args: Arguments) -> anyhow::Result<PathBuf> {
    let config = args.to_config()?;

    // the file name follows the locale as typed, not the service's code for it
    let locale = args.locale.trim();
    let input = files::resolve_input(&args.file)?;
    files::ensure_different_language(&input, locale)?;
    files::ensure_different_language(&input, &config.target_locale)?;
    let output = files::resolve_output(
        &input,
        args.output.as_deref(),
        locale,
        config.extend,
        config.override_existing,
    )?;

    let source = files::load_document(&input, config.encoding)
        .with_context(|| format!("failed to load source file {}", input.display()))?;
    let mode = if config.extend {
        let existing = files::load_document(&output, config.encoding)
            .with_context(|| format!("failed to load translation file {}", output.display()))?;
        Mode::Extend(existing)
    } else {
        Mode::Fresh
    };

    let provider = if args.mock {
        config.mock_provider()
    } else {
        config
            .provider(&args.credentials())
            .await
            .context("failed to set up the translation provider")?
    };

    let outcome = pipeline::run(&config, provider, &source, mode).await?;
    files::save_document(&output, &outcome.document, config.indent, config.encoding)?;

    info!(
        requested = outcome.requested,
        cache_hits = outcome.cache_hits,
        failures = outcome.failures,
        "translation finished"
    );
    println!("Results saved on {}", output.display());

    Ok(output)
}
