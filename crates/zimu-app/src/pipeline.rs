//! One capture request from trigger to annotated caption.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;
use zimu_ocr::{NormalizedImage, RecognitionResult};
use zimu_translator::{Translator, translate_or_fail};
use zimu_types::{AbortNotice, AbortReason, AnnotatedCharacter, CaptureState, TextSource};

use crate::capture_context::CaptureContext;

/// A user-triggered capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    pub id: Uuid,
    /// Host of the page the video plays on
    pub page_host: Option<String>,
}

impl CaptureRequest {
    pub fn new(page_host: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            page_host,
        }
    }
}

/// Annotated caption produced by a completed capture
#[derive(Debug, Clone, Serialize)]
pub struct CaptureRecord {
    pub raw_text: String,
    /// Unset when no translator is configured or translation failed
    pub translated_text: Option<String>,
    pub characters: Vec<AnnotatedCharacter>,
    /// Normalized caption crop, unset when the frame could not be captured
    #[serde(skip)]
    pub source_image: Option<Arc<NormalizedImage>>,
    pub text_source: TextSource,
    /// Recognition confidence when the recognized text was used
    pub confidence: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaptureOutcome {
    Complete(CaptureRecord),
    Aborted(AbortNotice),
}

impl CaptureOutcome {
    pub fn record(&self) -> Option<&CaptureRecord> {
        match self {
            CaptureOutcome::Complete(record) => Some(record),
            CaptureOutcome::Aborted(_) => None,
        }
    }

    pub fn abort_notice(&self) -> Option<&AbortNotice> {
        match self {
            CaptureOutcome::Complete(_) => None,
            CaptureOutcome::Aborted(notice) => Some(notice),
        }
    }
}

/// Text the annotator will work on, and where it came from
struct ChosenText {
    text: String,
    source: TextSource,
    confidence: Option<f32>,
}

/// State machine for a single capture
///
/// Owns everything the run touches; nothing is shared with other runs
/// except the read-only collaborators in the context.
pub struct CaptureOrchestrator {
    ctx: CaptureContext,
    request: CaptureRequest,
    state: CaptureState,
    history: Vec<CaptureState>,
    outcome: Option<CaptureOutcome>,
}

impl CaptureOrchestrator {
    pub fn new(ctx: CaptureContext, request: CaptureRequest) -> Self {
        Self {
            ctx,
            request,
            state: CaptureState::Idle,
            history: vec![CaptureState::Idle],
            outcome: None,
        }
    }

    /// Every state visited so far, starting with `Idle`
    pub fn history(&self) -> &[CaptureState] {
        &self.history
    }

    /// Run to a terminal state; later calls return the same outcome
    pub async fn run(&mut self) -> CaptureOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let outcome = self.drive().await;
        self.outcome = Some(outcome.clone());
        outcome
    }

    async fn drive(&mut self) -> CaptureOutcome {
        let settings = self.ctx.settings.clone();

        if !settings
            .capture
            .is_supported_host(self.request.page_host.as_deref())
        {
            return self.abort(AbortReason::UnsupportedSite);
        }

        if !self.ctx.playback.is_paused() {
            return self.abort(AbortReason::VideoNotPaused);
        }

        let snapshot = match self.ctx.captions.locate_caption_region() {
            Some(snapshot) if snapshot.region.is_valid() => snapshot,
            Some(snapshot) => {
                tracing::warn!("Malformed caption region {:?}", snapshot.region);
                return self.abort(AbortReason::NoCaptionRegion);
            }
            None => return self.abort(AbortReason::NoCaptionRegion),
        };

        self.transition(CaptureState::LocatingRegion);
        let region = snapshot.region;
        let dom_text = snapshot.text.trim().to_string();
        tracing::debug!(
            "Caption region {}x{} at ({}, {})",
            region.width,
            region.height,
            region.x,
            region.y
        );

        self.transition(CaptureState::CapturingFrame);
        let frame = match self.ctx.frames.capture_frame().await {
            Ok(frame) => frame,
            Err(e) if settings.capture.fallback_to_dom_text => {
                tracing::warn!("Frame capture failed, continuing with DOM text: {}", e);
                let chosen = ChosenText {
                    text: dom_text,
                    source: TextSource::Dom,
                    confidence: None,
                };
                return self.complete(chosen, None).await;
            }
            Err(e) => {
                tracing::warn!("Frame capture failed: {}", e);
                return self.abort(AbortReason::FrameCaptureFailed);
            }
        };

        self.transition(CaptureState::Extracting);
        let crop = zimu_ocr::extract(&frame, region);
        drop(frame);

        self.transition(CaptureState::Normalizing);
        let image = Arc::new(zimu_ocr::normalize(&crop, settings.normalize));

        self.transition(CaptureState::Recognizing);
        let recognition = self.recognize(&image).await;

        let chosen = match recognition.usable_text() {
            Some(text) => ChosenText {
                text: text.trim().to_string(),
                source: TextSource::Recognized,
                confidence: Some(recognition.confidence),
            },
            None => {
                tracing::debug!(
                    "Using DOM text: {}",
                    recognition
                        .failure_reason
                        .as_deref()
                        .unwrap_or("recognized text is blank")
                );
                ChosenText {
                    text: dom_text,
                    source: TextSource::Dom,
                    confidence: None,
                }
            }
        };

        self.complete(chosen, Some(image)).await
    }

    async fn recognize(&self, image: &NormalizedImage) -> RecognitionResult {
        if image.is_empty() {
            return RecognitionResult::failure("caption region lies outside the frame");
        }

        let recognizer = &self.ctx.recognizer;
        let limit = self.ctx.settings.recognition_timeout;
        match tokio::time::timeout(limit, recognizer.recognize(image)).await {
            Ok(result) => {
                if !result.succeeded {
                    tracing::warn!(
                        "Recognition via {} failed: {}",
                        recognizer.name(),
                        result.failure_reason.as_deref().unwrap_or("unknown")
                    );
                }
                result
            }
            Err(_) => {
                tracing::warn!(
                    "Recognition via {} timed out after {:?}",
                    recognizer.name(),
                    limit
                );
                RecognitionResult::failure("recognition timed out")
            }
        }
    }

    async fn complete(
        &mut self,
        chosen: ChosenText,
        source_image: Option<Arc<NormalizedImage>>,
    ) -> CaptureOutcome {
        self.transition(CaptureState::Annotating);
        if chosen.text.trim().is_empty() {
            return self.abort(AbortReason::CaptionTextEmpty);
        }
        let characters = self.ctx.processor.annotate(&chosen.text);

        let translated_text = match self.ctx.translator.clone() {
            Some(translator) => {
                self.transition(CaptureState::Translating);
                self.translate(translator.as_ref(), &chosen.text).await
            }
            None => None,
        };

        self.transition(CaptureState::Complete);
        tracing::info!(
            "Capture {} complete: {} characters from {:?} text",
            self.request.id,
            characters.len(),
            chosen.source
        );

        CaptureOutcome::Complete(CaptureRecord {
            raw_text: chosen.text,
            translated_text,
            characters,
            source_image,
            text_source: chosen.source,
            confidence: chosen.confidence,
        })
    }

    async fn translate(&self, translator: &dyn Translator, text: &str) -> Option<String> {
        let settings = &self.ctx.settings;
        let attempt = translate_or_fail(
            translator,
            text,
            settings.source_language.clone(),
            settings.target_language.clone(),
        );

        match tokio::time::timeout(settings.translation_timeout, attempt).await {
            Ok(outcome) => outcome.translated,
            Err(_) => {
                tracing::warn!(
                    "Translation via {} timed out after {:?}",
                    translator.metadata().name,
                    settings.translation_timeout
                );
                None
            }
        }
    }

    fn transition(&mut self, next: CaptureState) {
        tracing::debug!(
            "Capture {}: {:?} -> {:?}",
            self.request.id,
            self.state,
            next
        );
        self.state = next;
        self.history.push(next);
    }

    fn abort(&mut self, reason: AbortReason) -> CaptureOutcome {
        let notice = AbortNotice {
            reason,
            state: self.state,
        };
        tracing::info!("Capture {} aborted: {}", self.request.id, notice);
        self.transition(CaptureState::Aborted);
        CaptureOutcome::Aborted(notice)
    }
}
