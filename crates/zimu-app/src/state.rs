use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use zimu_config::Config;
use zimu_config::ocr::RecognizerBackend;
use zimu_core::language::LanguageProcessor;
use zimu_lang_chinese::{ChineseProcessor, ChineseTranslator, HanziDictionary};
use zimu_ocr::{HttpRecognitionEngine, PlaceholderEngine, RecognitionEngine};
use zimu_translator::{PlaceholderTranslator, Translator};

/// Shared, read-mostly application state
///
/// The processor (and its lexicon) is loaded once and only read afterwards,
/// so concurrent captures share it without locking.
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub processor: Arc<dyn LanguageProcessor>,
    pub recognizer: Arc<dyn RecognitionEngine>,
    pub translator: Option<Arc<dyn Translator>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let processor: Arc<dyn LanguageProcessor> = if config.dictionary.enabled {
            Arc::new(ChineseProcessor::with_additional_dicts(
                &config.dictionary.additional_paths,
            ))
        } else {
            tracing::warn!("Dictionary disabled, using empty processor");
            Arc::new(ChineseProcessor::from_dictionary(HanziDictionary::new()))
        };

        let recognizer = recognizer_from_config(&config);
        let translator = translator_from_config(&config);

        Self::with_components(config, processor, recognizer, translator)
    }

    pub fn with_components(
        config: Config,
        processor: Arc<dyn LanguageProcessor>,
        recognizer: Arc<dyn RecognitionEngine>,
        translator: Option<Arc<dyn Translator>>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            processor,
            recognizer,
            translator,
        }
    }
}

/// Pick the recognition backend once, at startup
pub fn recognizer_from_config(config: &Config) -> Arc<dyn RecognitionEngine> {
    match config.ocr.effective_backend() {
        RecognizerBackend::Http => {
            tracing::info!("Using HTTP recognizer at {}", config.ocr.endpoint);
            Arc::new(HttpRecognitionEngine::new(
                config.ocr.endpoint.clone(),
                config.ocr.language.clone(),
                Duration::from_millis(config.ocr.timeout_ms),
            ))
        }
        RecognizerBackend::Placeholder => {
            tracing::info!("No recognizer configured, captions will use DOM text");
            Arc::new(PlaceholderEngine)
        }
    }
}

pub fn translator_from_config(config: &Config) -> Option<Arc<dyn Translator>> {
    let translator = &config.translator;
    if !translator.enabled {
        return None;
    }

    match translator.provider.as_str() {
        "deepl" if !translator.api_key.is_empty() => Some(Arc::new(ChineseTranslator::with_timeout(
            translator.api_key.clone(),
            translator.api_url.clone(),
            Duration::from_millis(translator.timeout_ms),
        ))),
        "deepl" => {
            tracing::warn!("DeepL translator enabled without an API key, translation disabled");
            None
        }
        "placeholder" => Some(Arc::new(PlaceholderTranslator)),
        other => {
            tracing::warn!("Unknown translator provider '{}', translation disabled", other);
            None
        }
    }
}
