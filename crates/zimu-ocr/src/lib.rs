mod capture;
mod ocr;
mod preprocess;

pub use capture::{CaptureError, Frame, encode_png, extract};
pub use ocr::{
    HttpRecognitionEngine, PLACEHOLDER_FAILURE_REASON, PlaceholderEngine, RecognitionEngine,
    RecognitionResult,
};
pub use preprocess::{
    BINARIZE_CUTOFF, CONTRAST_MIDPOINT, DEFAULT_CONTRAST_FACTOR, HIGH_CONTRAST_FACTOR,
    NormalizeOptions, NormalizedImage, luma, normalize,
};
pub use zimu_types::CaptionRegion;
