pub mod types;

pub use types::{
    AbortNotice, AbortReason, AnnotatedCharacter, CaptionRegion, CaptionSnapshot, CaptureState,
    TextSource, UsageExample,
};
