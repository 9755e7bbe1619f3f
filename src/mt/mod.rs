/// Machine Translation Module
///
/// Everything needed to turn one source string into one target string:
///
/// 1. **MT Trait & Providers** - `MachineTranslator` with DeepL, AWS Translate,
///    Google Translate and mock implementations
/// 2. **Response decoding** - charset-aware body decoding shared by the HTTP providers
/// 3. **StringTranslator** - per-run cache, pacing delay and degrade-to-source policy
/// 4. **Translation log** - one user-facing line per translated leaf
///
/// # Example
///
/// ```ignore
/// use json_translate::mt::{DeeplProvider, StringTranslator};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = Arc::new(DeeplProvider::from_env()?);
///     let mut translator = StringTranslator::new(provider, "ES").with_logging(true);
///     println!("{}", translator.translate_string("Hello").await);
///     Ok(())
/// }
/// ```
pub mod aws;
pub mod cache;
pub mod deepl;
pub mod error;
pub mod google_translate;
pub mod log;
pub mod mock;
pub mod response;
pub mod string_translator;
pub mod translator;

pub use aws::{AwsTranslateProvider, Formality, Profanity, TranslateTextClient};
pub use cache::TranslationCache;
pub use deepl::DeeplProvider;
pub use error::{MtError, MtResult};
pub use google_translate::GoogleTranslateProvider;
pub use log::{LogEntry, LogStatus, TranslationLog};
pub use mock::{MockMode, MockTranslator};
pub use string_translator::StringTranslator;
pub use translator::{MachineTranslator, TranslationRequest};
