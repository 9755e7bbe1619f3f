//! Target language validation per translation service

use crate::config::Service;
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Target languages accepted by DeepL
/// https://developers.deepl.com/docs/resources/supported-languages
pub const DEEPL_SUPPORTED_LANGS: &[&str] = &[
    "AR", "BG", "CS", "DA", "DE", "EL", "EN-GB", "EN-US", "ES", "ET", "FI", "FR", "HU", "ID",
    "IT", "JA", "KO", "LT", "LV", "NB", "NL", "PL", "PT-BR", "PT-PT", "RO", "RU", "SK", "SL",
    "SV", "TR", "UK", "ZH",
];

/// Deprecated DeepL targets without a regional variant, and the variant used instead
const DEEPL_LEGACY_TARGETS: &[(&str, &str)] = &[("EN", "EN-GB"), ("PT", "PT-PT")];

/// Languages supported by AWS Translate, in the casing AWS expects
/// https://docs.aws.amazon.com/translate/latest/dg/what-is-languages.html
pub const AWS_SUPPORTED_LANGS: &[&str] = &[
    "af", "sq", "am", "ar", "hy", "az", "bn", "bs", "bg", "ca", "zh", "zh-TW", "hr", "cs", "da",
    "fa-AF", "nl", "en", "et", "fa", "tl", "fi", "fr", "fr-CA", "ka", "de", "el", "gu", "ht",
    "ha", "he", "hi", "hu", "is", "id", "ga", "it", "ja", "kn", "kk", "ko", "lv", "lt", "mk",
    "ms", "ml", "mt", "mr", "mn", "no", "ps", "pl", "pt", "pt-PT", "pa", "ro", "ru", "sr", "si",
    "sk", "sl", "so", "es", "es-MX", "sw", "sv", "ta", "te", "th", "tr", "uk", "ur", "uz", "vi",
    "cy",
];

/// Two or three letter language, optional region or script subtag
static LOCALE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,4})?$").expect("locale pattern is valid")
});

/// Validate `locale` for `service` and return it in the casing the service expects
pub fn target_lang_code(service: Service, locale: &str) -> Result<String> {
    let unsupported = || Error::UnsupportedLanguage {
        code: locale.to_string(),
        service,
    };

    let locale = locale.trim();
    if !LOCALE_PATTERN.is_match(locale) {
        return Err(unsupported());
    }

    match service {
        Service::Deepl => {
            let code = locale.to_uppercase();
            if let Some((_, variant)) = DEEPL_LEGACY_TARGETS.iter().find(|(old, _)| *old == code) {
                warn!(
                    locale = %code,
                    variant,
                    "DeepL needs a regional variant for this language, using the default one"
                );
                return Ok(variant.to_string());
            }
            if DEEPL_SUPPORTED_LANGS.contains(&code.as_str()) {
                Ok(code)
            } else {
                Err(unsupported())
            }
        }
        Service::Aws => AWS_SUPPORTED_LANGS
            .iter()
            .find(|code| code.eq_ignore_ascii_case(locale))
            .map(|code| code.to_string())
            .ok_or_else(unsupported),
        Service::Google => Ok(locale.to_string()),
    }
}

/// Source language for `service`: AWS codes are checked and put in AWS casing
/// (`auto` lets AWS detect the language), other services get the code as given
pub fn source_lang_code(service: Service, locale: &str) -> Result<String> {
    let locale = locale.trim();
    match service {
        Service::Aws if locale.eq_ignore_ascii_case("auto") => Ok("auto".to_string()),
        Service::Aws => target_lang_code(service, locale),
        Service::Deepl | Service::Google => Ok(locale.to_string()),
    }
}
