use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use zimu_lang_chinese::ChineseProcessor;
use zimu_ocr::{
    CaptureError, Frame, NormalizedImage, PlaceholderEngine, RecognitionEngine, RecognitionResult,
};
use zimu_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};
use zimu_types::{CaptionRegion, CaptionSnapshot};

use crate::capture_context::{CaptureContext, CaptureSettings};
use crate::sources::{FixedPlayback, FrameSource, StaticCaption};

mod service_tests;

/// Uniform grey screenshot
pub struct SolidFrames {
    pub width: u32,
    pub height: u32,
}

#[async_trait]
impl FrameSource for SolidFrames {
    async fn capture_frame(&self) -> Result<Frame, CaptureError> {
        let len = (self.width * self.height * 4) as usize;
        Frame::from_rgba(self.width, self.height, vec![200; len])
    }
}

pub struct FailingFrames;

#[async_trait]
impl FrameSource for FailingFrames {
    async fn capture_frame(&self) -> Result<Frame, CaptureError> {
        Err(CaptureError::Unavailable("screenshot permission denied".to_string()))
    }
}

pub struct FailingEngine;

#[async_trait]
impl RecognitionEngine for FailingEngine {
    async fn recognize(&self, _image: &NormalizedImage) -> RecognitionResult {
        RecognitionResult::failure("engine offline")
    }

    fn name(&self) -> &str {
        "failing"
    }
}

pub struct FixedTextEngine {
    pub text: &'static str,
    pub confidence: f32,
}

#[async_trait]
impl RecognitionEngine for FixedTextEngine {
    async fn recognize(&self, _image: &NormalizedImage) -> RecognitionResult {
        RecognitionResult::success(self.text, self.confidence)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

pub struct SlowEngine {
    pub delay: Duration,
}

#[async_trait]
impl RecognitionEngine for SlowEngine {
    async fn recognize(&self, _image: &NormalizedImage) -> RecognitionResult {
        tokio::time::sleep(self.delay).await;
        RecognitionResult::success("好", 0.9)
    }

    fn name(&self) -> &str {
        "slow"
    }
}

pub struct FailingTranslator;

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(
        &self,
        _text: &str,
        _from: LanguageCode,
        _to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        Err(TranslateError::ApiError("HTTP 500".to_string()))
    }

    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
        vec![]
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Failing".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

pub fn snapshot(x: i32, y: i32, width: u32, height: u32, text: &str) -> CaptionSnapshot {
    CaptionSnapshot {
        region: CaptionRegion::new(x, y, width, height),
        text: text.to_string(),
    }
}

/// Paused 100x100 frame, caption "你好！" at {10, 10, 40, 20}, no real recognizer
pub fn reference_context() -> CaptureContext {
    CaptureContext {
        frames: Arc::new(SolidFrames {
            width: 100,
            height: 100,
        }),
        captions: Arc::new(StaticCaption::new(Some(snapshot(10, 10, 40, 20, "你好！")))),
        playback: Arc::new(FixedPlayback::new(true)),
        recognizer: Arc::new(PlaceholderEngine),
        processor: Arc::new(ChineseProcessor::new()),
        translator: None,
        settings: CaptureSettings::default(),
    }
}
