//! Simple OCR test - run with:
//! cargo run -p zimu-ocr --bin test_ocr -- <frame.png> <x> <y> <width> <height> [endpoint]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use zimu_ocr::{
    CaptionRegion, Frame, HttpRecognitionEngine, NormalizeOptions, PlaceholderEngine,
    RecognitionEngine, encode_png, extract, normalize,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    tracing::debug!("=== OCR Test ===\n");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 5 {
        anyhow::bail!("usage: test_ocr <frame.png> <x> <y> <width> <height> [endpoint]");
    }

    // 1. Load frame
    let bytes = std::fs::read(&args[0]).with_context(|| format!("Failed to read {}", args[0]))?;
    let frame = Frame::from_encoded(&bytes)?;
    tracing::debug!("1. Frame: {}x{}", frame.width(), frame.height());

    // 2. Extract region
    let region = CaptionRegion::new(
        args[1].parse().context("x")?,
        args[2].parse().context("y")?,
        args[3].parse().context("width")?,
        args[4].parse().context("height")?,
    );
    let crop = extract(&frame, region);
    tracing::debug!("2. Cropped {:?} -> {}x{}", region, crop.width(), crop.height());

    // 3. Normalize both variants and save for inspection
    for (name, options) in [
        ("test_normalized.png", NormalizeOptions::default()),
        ("test_high_contrast.png", NormalizeOptions::high_contrast()),
    ] {
        let start = Instant::now();
        let normalized = normalize(&crop, options);
        std::fs::write(name, encode_png(normalized.as_rgba())?)?;
        tracing::debug!("3. {:?} in {:?} -> {}", options, start.elapsed(), name);
    }

    // 4. Run OCR
    let normalized = normalize(&crop, NormalizeOptions::default());
    let engine: Box<dyn RecognitionEngine> = match args.get(5) {
        Some(endpoint) => Box::new(HttpRecognitionEngine::new(
            endpoint.clone(),
            "zh".to_string(),
            Duration::from_secs(10),
        )),
        None => Box::new(PlaceholderEngine),
    };

    let start = Instant::now();
    let result = engine.recognize(&normalized).await;
    tracing::debug!("4. {} engine took {:?}", engine.name(), start.elapsed());
    if result.succeeded {
        tracing::debug!("   > {} (confidence {:.2})", result.text, result.confidence);
    } else {
        tracing::debug!("   Failed: {:?}", result.failure_reason);
    }

    tracing::debug!("\n=== Done ===");
    Ok(())
}
