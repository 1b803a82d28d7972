use image::{Rgba, RgbaImage};

/// Contrast is stretched around this grey level
pub const CONTRAST_MIDPOINT: f32 = 128.0;
/// Stretched values above this become white in high-contrast mode
pub const BINARIZE_CUTOFF: f32 = 145.0;
pub const DEFAULT_CONTRAST_FACTOR: f32 = 1.5;
pub const HIGH_CONTRAST_FACTOR: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    pub contrast_factor: f32,
    /// Snap every pixel to pure black or white
    pub binarize: bool,
}

impl NormalizeOptions {
    /// Binarized preset for solid-background captions
    pub fn high_contrast() -> Self {
        Self {
            contrast_factor: HIGH_CONTRAST_FACTOR,
            binarize: true,
        }
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            contrast_factor: DEFAULT_CONTRAST_FACTOR,
            binarize: false,
        }
    }
}

/// Grayscale, contrast-stretched caption bitmap ready for recognition
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    image: RgbaImage,
    options: NormalizeOptions,
}

impl NormalizedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    pub fn options(&self) -> NormalizeOptions {
        self.options
    }

    pub fn into_inner(self) -> RgbaImage {
        self.image
    }
}

/// Weighted luma of an RGB triple
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)
}

/// Grayscale + contrast transform into a new bitmap of the same size
///
/// The grey level is written to all three color channels, alpha is kept.
/// `bitmap` is left untouched so callers can still display the original.
pub fn normalize(bitmap: &RgbaImage, options: NormalizeOptions) -> NormalizedImage {
    let mut image = bitmap.clone();

    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let value = grey_level(luma(r, g, b), options);
        *pixel = Rgba([value, value, value, a]);
    }

    NormalizedImage { image, options }
}

fn grey_level(luma: f32, options: NormalizeOptions) -> u8 {
    let stretched = options.contrast_factor * (luma - CONTRAST_MIDPOINT) + CONTRAST_MIDPOINT;

    if options.binarize {
        if stretched > BINARIZE_CUTOFF { 255 } else { 0 }
    } else {
        stretched.round().clamp(0.0, 255.0) as u8
    }
}
