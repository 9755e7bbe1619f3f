//! AWS Translate provider for machine translation
//!
//! Credentials and region come from the standard AWS chain
//! (`AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`, `AWS_REGION`, shared
//! profiles). AWS needs the source language of every request; a configured
//! glossary is sent as the name of a custom terminology.
//!
//! The SDK client sits behind [`TranslateTextClient`] so the provider can be
//! exercised without AWS.

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, TranslationRequest, validate_locale};
use async_trait::async_trait;
use aws_sdk_translate::config::Region;
use aws_sdk_translate::error::{DisplayErrorContext, SdkError};
use aws_sdk_translate::types::TranslationSettings;
use std::sync::Arc;
use tracing::debug;

/// Level of formality of the translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Formality {
    Formal,
    Informal,
}

/// Handling of profane words and phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Profanity {
    /// Replace them with `?$#@$`
    Mask,
}

/// Parameters of one `TranslateText` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateTextInput {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
    pub terminology: Option<String>,
    pub formality: Option<Formality>,
    pub profanity: Option<Profanity>,
}

/// The slice of the AWS Translate API the provider needs
#[async_trait]
pub trait TranslateTextClient: Send + Sync {
    /// Send one `TranslateText` call, returning `TranslatedText`
    async fn send(&self, input: TranslateTextInput) -> MtResult<String>;
}

#[async_trait]
impl TranslateTextClient for aws_sdk_translate::Client {
    async fn send(&self, input: TranslateTextInput) -> MtResult<String> {
        let settings = TranslationSettings::builder()
            .set_formality(input.formality.map(|formality| match formality {
                Formality::Formal => aws_sdk_translate::types::Formality::Formal,
                Formality::Informal => aws_sdk_translate::types::Formality::Informal,
            }))
            .set_profanity(
                input
                    .profanity
                    .map(|Profanity::Mask| aws_sdk_translate::types::Profanity::Mask),
            )
            .build();

        let output = self
            .translate_text()
            .text(input.text)
            .source_language_code(input.source_language)
            .target_language_code(input.target_language)
            .set_terminology_names(input.terminology.map(|name| vec![name]))
            .settings(settings)
            .send()
            .await
            .map_err(|err| {
                let detail = DisplayErrorContext(&err).to_string();
                debug!(error = %detail, "TranslateText failed");
                match &err {
                    SdkError::ServiceError(_) => match err.raw_response() {
                        Some(response) => MtError::Transport(response.status().as_u16()),
                        None => MtError::Translation(detail),
                    },
                    SdkError::ResponseError(_) => MtError::MalformedResponse(detail),
                    SdkError::ConstructionFailure(_) => MtError::Config(detail),
                    _ => MtError::Network(detail),
                }
            })?;

        Ok(output.translated_text().to_string())
    }
}

/// AWS Translate provider
#[derive(Clone)]
pub struct AwsTranslateProvider {
    client: Arc<dyn TranslateTextClient>,
    formality: Option<Formality>,
    profanity: Option<Profanity>,
}

impl AwsTranslateProvider {
    pub fn new(client: Arc<dyn TranslateTextClient>) -> Self {
        Self {
            client,
            formality: None,
            profanity: None,
        }
    }

    /// Create a provider from the AWS environment, `region` overriding `AWS_REGION`
    pub async fn from_env(region: Option<String>) -> MtResult<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = loader.load().await;

        if sdk_config.region().is_none() {
            return Err(MtError::Config(
                "AWS region not set, use AWS_REGION or --aws-region".to_string(),
            ));
        }

        Ok(Self::new(Arc::new(aws_sdk_translate::Client::new(
            &sdk_config,
        ))))
    }

    pub fn with_formality(mut self, formality: Option<Formality>) -> Self {
        self.formality = formality;
        self
    }

    pub fn with_profanity(mut self, profanity: Option<Profanity>) -> Self {
        self.profanity = profanity;
        self
    }
}

impl std::fmt::Debug for AwsTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsTranslateProvider")
            .field("formality", &self.formality)
            .field("profanity", &self.profanity)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for AwsTranslateProvider {
    async fn translate(&self, request: &TranslationRequest<'_>) -> MtResult<Vec<String>> {
        validate_locale(request.target_locale)?;
        let source = request.source_locale.ok_or_else(|| {
            MtError::Config("AWS Translate requires a source locale".to_string())
        })?;
        validate_locale(source)?;

        let translated = self
            .client
            .send(TranslateTextInput {
                text: request.text.to_string(),
                source_language: source.to_string(),
                target_language: request.target_locale.to_string(),
                terminology: request.glossary.map(str::to_string),
                formality: self.formality,
                profanity: self.profanity,
            })
            .await?;

        if translated.is_empty() {
            return Err(MtError::MalformedResponse(
                "empty 'TranslatedText' in response".to_string(),
            ));
        }
        Ok(vec![translated])
    }

    fn provider_name(&self) -> &str {
        "AWS Translate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::{LogStatus, StringTranslator};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Records every call and answers with a fixed result
    struct FakeClient {
        answer: MtResult<String>,
        calls: Mutex<Vec<TranslateTextInput>>,
    }

    impl FakeClient {
        fn new(answer: MtResult<String>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<TranslateTextInput> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TranslateTextClient for FakeClient {
        async fn send(&self, input: TranslateTextInput) -> MtResult<String> {
            self.calls.lock().unwrap().push(input);
            self.answer.clone()
        }
    }

    #[tokio::test]
    async fn test_request_mapping() {
        let client = FakeClient::new(Ok("Hola".to_string()));
        let provider = AwsTranslateProvider::new(client.clone())
            .with_formality(Some(Formality::Informal))
            .with_profanity(Some(Profanity::Mask));
        let request = TranslationRequest::new("Hello", "es")
            .with_source_locale(Some("en"))
            .with_glossary(Some("product-names"));

        assert_eq!(provider.translate(&request).await.unwrap(), vec!["Hola"]);
        assert_eq!(
            client.calls(),
            vec![TranslateTextInput {
                text: "Hello".to_string(),
                source_language: "en".to_string(),
                target_language: "es".to_string(),
                terminology: Some("product-names".to_string()),
                formality: Some(Formality::Informal),
                profanity: Some(Profanity::Mask),
            }]
        );
    }

    #[tokio::test]
    async fn test_defaults_send_no_settings() {
        let client = FakeClient::new(Ok("Hallo".to_string()));
        let provider = AwsTranslateProvider::new(client.clone());
        let request = TranslationRequest::new("Hello", "de").with_source_locale(Some("en"));

        provider.translate(&request).await.unwrap();

        let call = &client.calls()[0];
        assert_eq!(call.formality, None);
        assert_eq!(call.profanity, None);
        assert_eq!(call.terminology, None);
    }

    #[tokio::test]
    async fn test_source_locale_required() {
        let client = FakeClient::new(Ok("Hola".to_string()));
        let provider = AwsTranslateProvider::new(client.clone());

        match provider.translate(&TranslationRequest::new("Hello", "es")).await {
            Err(MtError::Config(msg)) => assert!(msg.contains("source locale")),
            other => panic!("Expected Config error, got {:?}", other),
        }
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_translation_is_malformed() {
        let provider = AwsTranslateProvider::new(FakeClient::new(Ok(String::new())));
        let request = TranslationRequest::new("Hello", "es").with_source_locale(Some("en"));
        assert!(matches!(
            provider.translate(&request).await,
            Err(MtError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_service_error_falls_back_to_source() {
        let provider = AwsTranslateProvider::new(FakeClient::new(Err(MtError::Transport(400))));
        let mut translator = StringTranslator::new(Arc::new(provider), "es")
            .with_source_locale(Some("en".to_string()));

        assert_eq!(translator.translate_string("Hello").await, "Hello");
        assert_eq!(translator.log().count(LogStatus::Error), 1);
    }

    #[test]
    fn test_provider_name_and_debug() {
        let provider = AwsTranslateProvider::new(FakeClient::new(Ok(String::new())))
            .with_formality(Some(Formality::Formal));
        assert_eq!(provider.provider_name(), "AWS Translate");
        assert!(format!("{:?}", provider).contains("Formal"));
    }
}
