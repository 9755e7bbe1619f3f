//! End-to-End Integration Tests for the translation pipeline
//!
//! The offline tests run against the mock translator. The ones marked
//! `#[ignore]` call the real providers.
//!
//! # Running Integration Tests
//!
//! ```bash
//! export DEEPL_AUTH_KEY=$(cat .env | grep DEEPL_AUTH_KEY | cut -d= -f2)
//! cargo test --lib integration_tests -- --ignored --nocapture
//! ```

#[cfg(test)]
mod tests {
    use crate::config::{Service, TranslateConfig};
    use crate::files;
    use crate::mt::{DeeplProvider, LogStatus, MockMode, MockTranslator};
    use crate::pipeline::{self, Mode};
    use crate::tree::{SkipSet, diff, translate_tree};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn spanish_mappings() -> HashMap<(String, String), String> {
        [
            ("Save", "Guardar"),
            ("Cancel", "Cancelar"),
            ("Welcome", "Bienvenido"),
            ("Mon", "Lun"),
            ("Square metres: m²", "Metros cuadrados: m²"),
        ]
        .into_iter()
        .map(|(en, es)| ((en.to_string(), "ES".to_string()), es.to_string()))
        .collect()
    }

    fn config() -> TranslateConfig {
        let mut config = TranslateConfig::new(Service::Deepl, "ES");
        config.delay = Duration::ZERO;
        config
    }

    /// Same key sets, same array lengths, same kinds everywhere except strings
    fn same_shape(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && same_shape(va, vb))
            }
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_shape(x, y))
            }
            (Value::String(_), Value::String(_)) => true,
            (a, b) => a == b,
        }
    }

    // ============================================================================
    // TEST 1: A realistic bundle keeps its shape
    // ============================================================================

    #[tokio::test]
    async fn test_e2e_bundle_shape_preserved() {
        let source: Value = serde_json::from_str(
            r#"{
                "app": {"title": "Welcome", "version": 3, "beta": true},
                "actions": ["Save", "Cancel", ""],
                "units": {"area": "Square metres: m²", "missing": null},
                "routes": {"home": "/", "settings": "/settings"}
            }"#,
        )
        .unwrap();

        let mock = Arc::new(MockTranslator::new(MockMode::Mappings(spanish_mappings())));
        let mut config = config();
        config.skip = ["routes"].into_iter().collect();

        let outcome = pipeline::run(&config, mock.clone(), &source, Mode::Fresh)
            .await
            .unwrap();

        assert!(same_shape(&source, &outcome.document));
        assert_eq!(
            outcome.document,
            json!({
                "app": {"title": "Bienvenido", "version": 3, "beta": true},
                "actions": ["Guardar", "Cancelar", ""],
                "units": {"area": "Metros cuadrados: m²", "missing": null},
                "routes": {"home": "/", "settings": "/settings"}
            })
        );
        assert_eq!(mock.call_count(), 4);
    }

    // ============================================================================
    // TEST 2: Extend an existing translation file on disk
    // ============================================================================

    #[tokio::test]
    async fn test_e2e_extend_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("en.json");
        let output = dir.path().join("es.json");
        std::fs::write(
            &input,
            r#"{"common": {"save": "Save", "days": ["Mon"]}, "welcome": "Welcome"}"#,
        )
        .unwrap();
        std::fs::write(&output, r#"{"common": {"save": "Guardar", "days": ["Lun"]}}"#).unwrap();

        let config = config();
        let resolved = files::resolve_output(&input, None, "ES", true, false).unwrap();
        assert_eq!(resolved, output);

        let source = files::load_document(&input, config.encoding).unwrap();
        let existing = files::load_document(&output, config.encoding).unwrap();
        let mock = Arc::new(MockTranslator::new(MockMode::Mappings(spanish_mappings())));

        let outcome = pipeline::run(&config, mock.clone(), &source, Mode::Extend(existing))
            .await
            .unwrap();
        files::save_document(&output, &outcome.document, 2, config.encoding).unwrap();

        let saved = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            saved,
            "{\n  \"common\": {\n    \"save\": \"Guardar\",\n    \"days\": [\n      \"Lun\"\n    ]\n  },\n  \"welcome\": \"Bienvenido\"\n}"
        );
        // lists differ as a whole, so "days" is translated again
        assert_eq!(mock.requested_texts(), vec!["Mon", "Welcome"]);
    }

    // ============================================================================
    // TEST 3: A diff of a document against itself translates nothing
    // ============================================================================

    #[tokio::test]
    async fn test_e2e_self_diff_walks_nothing() {
        let document = json!({"a": {"b": ["c"]}, "d": "e"});
        let missing = diff(&document, &document).unwrap();

        let mock = Arc::new(MockTranslator::new(MockMode::Suffix));
        let mut translator = config().string_translator(mock.clone());
        let translated = translate_tree(&mut translator, &missing, &SkipSet::new()).await;

        assert_eq!(translated, json!({}));
        assert_eq!(mock.call_count(), 0);
    }

    // ============================================================================
    // TEST 4: Log lines follow traversal order
    // ============================================================================

    #[tokio::test]
    async fn test_e2e_log_in_traversal_order() {
        let mock = Arc::new(MockTranslator::new(MockMode::Mappings(spanish_mappings())));
        let mut config = config();
        config.log_translations = true;
        let mut translator = config.string_translator(mock);
        let source = json!({"b": "Save", "a": ["Cancel", "Save"]});

        translate_tree(&mut translator, &source, &SkipSet::new()).await;

        let lines: Vec<String> = translator
            .log()
            .entries()
            .iter()
            .map(|entry| entry.to_string())
            .collect();
        assert_eq!(
            lines,
            vec![
                "Save -> Guardar",
                "Cancel -> Cancelar",
                "warning: Save -> Guardar (cached)",
            ]
        );
        assert_eq!(translator.log().count(LogStatus::Success), 2);
    }

    // ============================================================================
    // TEST 5: Real DeepL call (requires DEEPL_AUTH_KEY)
    // ============================================================================

    #[tokio::test]
    #[ignore]
    async fn test_e2e_real_deepl() {
        if std::env::var("DEEPL_AUTH_KEY").is_err() {
            eprintln!("⚠️  Skipping: DEEPL_AUTH_KEY not set");
            return;
        }

        let provider = Arc::new(DeeplProvider::from_env().unwrap());
        let mut config = config();
        config.delay = Duration::from_millis(100);
        config.log_translations = true;
        let source = json!({"greeting": "Good morning", "unit": "m²", "count": 1});

        let outcome = pipeline::run(&config, provider, &source, Mode::Fresh)
            .await
            .unwrap();

        println!("{}", files::to_json_string(&outcome.document, 2).unwrap());
        assert_eq!(outcome.failures, 0);
        assert!(same_shape(&source, &outcome.document));
    }
}
