use serde::{Deserialize, Serialize};

pub type LanguageCode = String;

/// Target language used when the caller does not pick one
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Get supported language pairs
    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
    pub confidence: Option<f32>,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedLanguagePair { from: String, to: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

/// Result of a translation attempt as seen by the capture pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationOutcome {
    pub original: String,
    /// Unset when the attempt failed
    pub translated: Option<String>,
    pub language_code: LanguageCode,
    pub succeeded: bool,
}

impl TranslationOutcome {
    pub fn failed(original: &str, language_code: LanguageCode) -> Self {
        Self {
            original: original.to_string(),
            translated: None,
            language_code,
            succeeded: false,
        }
    }
}

/// Translate without surfacing errors
///
/// Any provider error becomes `succeeded: false` with no translated text.
/// `to` defaults to [`DEFAULT_TARGET_LANGUAGE`].
pub async fn translate_or_fail(
    translator: &dyn Translator,
    text: &str,
    from: LanguageCode,
    to: Option<LanguageCode>,
) -> TranslationOutcome {
    let to = to
        .filter(|code| !code.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());

    match translator.translate(text, from, to.clone()).await {
        Ok(translation) => TranslationOutcome {
            original: text.to_string(),
            translated: Some(translation.text),
            language_code: to,
            succeeded: true,
        },
        Err(e) => {
            tracing::warn!("Translation via {} failed: {}", translator.metadata().name, e);
            TranslationOutcome::failed(text, to)
        }
    }
}

pub const PLACEHOLDER_TRANSLATION: &str =
    "Translation placeholder - In a real implementation, this would be the translated text";

/// Provider that answers every request with a fixed string
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderTranslator;

#[async_trait::async_trait]
impl Translator for PlaceholderTranslator {
    async fn translate(
        &self,
        _text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        Ok(Translation {
            text: PLACEHOLDER_TRANSLATION.to_string(),
            from,
            to,
            provider: "placeholder".to_string(),
            confidence: None,
            alternatives: vec![],
        })
    }

    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
        vec![]
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Placeholder".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}
