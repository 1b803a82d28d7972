use std::sync::Arc;
use std::time::Duration;

use zimu_config::Config;
use zimu_config::capture::CaptureConfig;
use zimu_core::language::LanguageProcessor;
use zimu_ocr::{NormalizeOptions, RecognitionEngine};
use zimu_translator::Translator;

use crate::sources::{CaptureSources, FrameSource, PlaybackProbe, RegionSource};
use crate::state::AppState;

/// Config values one capture needs, read once when the capture starts
#[derive(Debug, Clone)]
pub struct CaptureSettings {
    pub capture: CaptureConfig,
    pub normalize: NormalizeOptions,
    pub recognition_timeout: Duration,
    pub translation_timeout: Duration,
    pub source_language: String,
    pub target_language: Option<String>,
}

impl CaptureSettings {
    pub fn from_config(config: &Config) -> Self {
        let normalize = if config.capture.high_contrast {
            NormalizeOptions::high_contrast()
        } else {
            NormalizeOptions {
                contrast_factor: config.capture.contrast_factor(),
                ..NormalizeOptions::default()
            }
        };

        Self {
            capture: config.capture.clone(),
            normalize,
            recognition_timeout: Duration::from_millis(config.ocr.timeout_ms),
            translation_timeout: Duration::from_millis(config.translator.timeout_ms),
            source_language: config.translator.from_lang.clone(),
            target_language: Some(config.translator.to_lang.clone()),
        }
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Everything one capture run depends on
///
/// Cloning only bumps reference counts, so each spawned capture gets its own.
#[derive(Clone)]
pub struct CaptureContext {
    pub frames: Arc<dyn FrameSource>,
    pub captions: Arc<dyn RegionSource>,
    pub playback: Arc<dyn PlaybackProbe>,
    pub recognizer: Arc<dyn RecognitionEngine>,
    pub processor: Arc<dyn LanguageProcessor>,
    pub translator: Option<Arc<dyn Translator>>,
    pub settings: CaptureSettings,
}

impl CaptureContext {
    pub async fn from_state(state: &AppState, sources: &CaptureSources) -> Self {
        let settings = {
            let config = state.config.read().await;
            CaptureSettings::from_config(&config)
        };

        Self {
            frames: sources.frames.clone(),
            captions: sources.captions.clone(),
            playback: sources.playback.clone(),
            recognizer: state.recognizer.clone(),
            processor: state.processor.clone(),
            translator: state.translator.clone(),
            settings,
        }
    }
}
