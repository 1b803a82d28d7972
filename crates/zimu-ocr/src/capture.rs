use image::{ImageEncoder, RgbaImage, imageops};
use zimu_types::CaptionRegion;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Frame buffer is {actual} bytes, expected {expected} for {width}x{height}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to decode frame: {0}")]
    Decode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame source unavailable: {0}")]
    Unavailable(String),
}

/// One captured video screenshot
///
/// Frames are immutable once built; extraction copies pixels out.
#[derive(Debug)]
pub struct Frame {
    image: RgbaImage,
}

impl Frame {
    /// Build a frame from raw RGBA bytes
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CaptureError> {
        let expected = width as usize * height as usize * 4;
        let actual = data.len();

        RgbaImage::from_raw(width, height, data)
            .filter(|_| actual == expected)
            .map(|image| Self { image })
            .ok_or(CaptureError::BufferSize {
                width,
                height,
                expected,
                actual,
            })
    }

    /// Decode an encoded screenshot (PNG, JPEG, ...)
    pub fn from_encoded(bytes: &[u8]) -> Result<Self, CaptureError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self { image })
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Crop `frame` to `region`, clamping the region to the frame bounds
///
/// A region entirely outside the frame yields a 0x0 bitmap.
pub fn extract(frame: &Frame, region: CaptionRegion) -> RgbaImage {
    let (left, right) = clamp_span(region.x, region.width, frame.width());
    let (top, bottom) = clamp_span(region.y, region.height, frame.height());

    imageops::crop_imm(frame.image(), left, top, right - left, bottom - top).to_image()
}

fn clamp_span(start: i32, len: u32, limit: u32) -> (u32, u32) {
    let start = i64::from(start);
    let end = start + i64::from(len);
    let limit = i64::from(limit);

    let lo = start.clamp(0, limit) as u32;
    let hi = end.clamp(0, limit) as u32;
    (lo, hi.max(lo))
}

/// Encode an RGBA bitmap as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buffer).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(buffer)
}
