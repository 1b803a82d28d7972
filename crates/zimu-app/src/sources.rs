//! Collaborators the capture pipeline pulls its inputs from.
//!
//! In the browser these are backed by the tab screenshot API and DOM
//! queries; the CLI backs them with files and command-line values.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use zimu_ocr::{CaptureError, Frame};
use zimu_types::CaptionSnapshot;

/// Supplies a full-viewport screenshot
#[async_trait]
pub trait FrameSource: Send + Sync {
    async fn capture_frame(&self) -> Result<Frame, CaptureError>;
}

/// Supplies the caption bounding box and the text it currently shows
pub trait RegionSource: Send + Sync {
    /// `None` when no caption is visible
    fn locate_caption_region(&self) -> Option<CaptionSnapshot>;
}

/// Reports whether the video is paused
pub trait PlaybackProbe: Send + Sync {
    fn is_paused(&self) -> bool;
}

/// The three input collaborators of one capture
#[derive(Clone)]
pub struct CaptureSources {
    pub frames: Arc<dyn FrameSource>,
    pub captions: Arc<dyn RegionSource>,
    pub playback: Arc<dyn PlaybackProbe>,
}

impl CaptureSources {
    pub fn new(
        frames: impl FrameSource + 'static,
        captions: impl RegionSource + 'static,
        playback: impl PlaybackProbe + 'static,
    ) -> Self {
        Self {
            frames: Arc::new(frames),
            captions: Arc::new(captions),
            playback: Arc::new(playback),
        }
    }
}

/// Reads the screenshot from an encoded image file on every capture
pub struct ImageFileFrameSource {
    path: PathBuf,
}

impl ImageFileFrameSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FrameSource for ImageFileFrameSource {
    async fn capture_frame(&self) -> Result<Frame, CaptureError> {
        let bytes = tokio::fs::read(&self.path).await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), self.path.display());

        // Decoding is CPU bound
        tokio::task::spawn_blocking(move || Frame::from_encoded(&bytes))
            .await
            .map_err(|e| CaptureError::Unavailable(format!("decode task failed: {e}")))?
    }
}

/// Caption whose position and text are known up front
pub struct StaticCaption {
    snapshot: Option<CaptionSnapshot>,
}

impl StaticCaption {
    pub fn new(snapshot: Option<CaptionSnapshot>) -> Self {
        Self { snapshot }
    }
}

impl RegionSource for StaticCaption {
    fn locate_caption_region(&self) -> Option<CaptionSnapshot> {
        self.snapshot.clone()
    }
}

pub struct FixedPlayback {
    paused: bool,
}

impl FixedPlayback {
    pub fn new(paused: bool) -> Self {
        Self { paused }
    }
}

impl PlaybackProbe for FixedPlayback {
    fn is_paused(&self) -> bool {
        self.paused
    }
}
