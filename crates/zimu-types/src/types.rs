use std::fmt;

use serde::{Deserialize, Serialize};

/// Caption bounding box in frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CaptionRegion {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A region with a zero side cannot hold a caption
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// What the region source sees: the caption box and the text it displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionSnapshot {
    pub region: CaptionRegion,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageExample {
    pub source_text: String,
    pub pronunciation: String,
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedCharacter {
    /// One grapheme cluster
    pub character: String,
    pub pronunciation: String,
    pub gloss: String,
    pub examples: Vec<UsageExample>,
}

impl AnnotatedCharacter {
    pub const UNKNOWN_PRONUNCIATION: &'static str = "?";
    pub const UNKNOWN_GLOSS: &'static str = "Unknown";

    /// Sentinel for characters missing from the lexicon
    pub fn unknown(character: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            pronunciation: Self::UNKNOWN_PRONUNCIATION.to_string(),
            gloss: Self::UNKNOWN_GLOSS.to_string(),
            examples: Vec::new(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.pronunciation == Self::UNKNOWN_PRONUNCIATION && self.gloss == Self::UNKNOWN_GLOSS
    }
}

/// Where the annotated caption text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    Recognized,
    Dom,
}

/// Capture pipeline states, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    Idle,
    LocatingRegion,
    CapturingFrame,
    Extracting,
    Normalizing,
    Recognizing,
    Annotating,
    Translating,
    Complete,
    Aborted,
}

impl CaptureState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CaptureState::Complete | CaptureState::Aborted)
    }
}

/// Serialized as the human-readable reason shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbortReason {
    #[serde(rename = "not on supported site")]
    UnsupportedSite,
    #[serde(rename = "video not paused")]
    VideoNotPaused,
    #[serde(rename = "no caption region found")]
    NoCaptionRegion,
    #[serde(rename = "caption text empty")]
    CaptionTextEmpty,
    #[serde(rename = "frame capture failed")]
    FrameCaptureFailed,
}

impl AbortReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbortReason::UnsupportedSite => "not on supported site",
            AbortReason::VideoNotPaused => "video not paused",
            AbortReason::NoCaptionRegion => "no caption region found",
            AbortReason::CaptionTextEmpty => "caption text empty",
            AbortReason::FrameCaptureFailed => "frame capture failed",
        }
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal notice for a capture that did not complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbortNotice {
    pub reason: AbortReason,
    /// State the pipeline was in when it gave up
    pub state: CaptureState,
}

impl fmt::Display for AbortNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (during {:?})", self.reason, self.state)
    }
}
