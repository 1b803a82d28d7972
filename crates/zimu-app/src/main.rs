use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use zimu_types::{CaptionRegion, CaptionSnapshot};

mod capture_context;
mod config_file;
mod controller;
mod display;
mod events;
mod pipeline;
mod sources;
mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::display::LatestCapture;
use self::events::AppEvent;
use self::pipeline::CaptureOutcome;
use self::sources::{CaptureSources, FixedPlayback, ImageFileFrameSource, StaticCaption};
use self::state::AppState;

#[derive(Parser)]
#[command(name = "zimu", version, about = "Capture and annotate Chinese video captions")]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// JSON config file
    #[arg(short, long, global = true, env = "ZIMU_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture the caption shown in a screenshot
    Capture {
        /// Screenshot of the video viewport
        #[arg(long)]
        frame: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        x: i32,

        #[arg(long, allow_hyphen_values = true)]
        y: i32,

        #[arg(long)]
        width: u32,

        #[arg(long)]
        height: u32,

        /// Caption text as read from the page
        #[arg(long)]
        text: String,

        /// The video is still playing
        #[arg(long)]
        playing: bool,

        /// Host of the page the video is on
        #[arg(long, default_value = "www.youtube.com")]
        host: String,

        /// Write the normalized caption crop as PNG
        #[arg(long)]
        save_image: Option<PathBuf>,
    },

    /// Annotate caption text without capturing
    Annotate { text: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let config = config_file::load_config(cli.config.as_deref())?;
    let state = Arc::new(AppState::new(config));

    match cli.command {
        Commands::Capture {
            frame,
            x,
            y,
            width,
            height,
            text,
            playing,
            host,
            save_image,
        } => {
            let snapshot = CaptionSnapshot {
                region: CaptionRegion::new(x, y, width, height),
                text,
            };
            let sources = CaptureSources::new(
                ImageFileFrameSource::new(frame),
                StaticCaption::new(Some(snapshot)),
                FixedPlayback::new(!playing),
            );

            let outcome = capture_once(state, sources, host).await?;

            if let (Some(path), Some(image)) = (
                save_image,
                outcome.record().and_then(|r| r.source_image.as_ref()),
            ) {
                let png = zimu_ocr::encode_png(image.as_rgba())?;
                std::fs::write(&path, png)
                    .with_context(|| format!("writing {}", path.display()))?;
                tracing::info!("Saved caption crop to {}", path.display());
            }

            if let Some(notice) = outcome.abort_notice() {
                tracing::warn!("Capture aborted: {}", notice);
            }
            print_json(&outcome)?;
        }
        Commands::Annotate { text } => {
            print_json(&state.processor.annotate(text.trim()))?;
        }
    }

    Ok(())
}

/// Run one capture through the event loop and wait for its outcome
async fn capture_once(
    state: Arc<AppState>,
    sources: CaptureSources,
    host: String,
) -> anyhow::Result<CaptureOutcome> {
    let controller = AppController::new(state, sources);
    let mut tasks = controller.spawn_tasks();
    let outcomes = controller.outcomes();

    let mut display = LatestCapture::new();
    let id = controller.request_capture(Some(host)).await?;
    display.requested(id);

    let outcome = loop {
        if let AppEvent::CaptureFinished {
            request_id,
            outcome,
        } = outcomes.recv().await?
        {
            if let Some(outcome) = display.accept(request_id, outcome) {
                break outcome;
            }
        }
    };

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("event loop exited: {e}"),
            Err(e) => tracing::error!("event loop panicked: {e}"),
        }
    }

    Ok(outcome)
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let json = if atty::is(atty::Stream::Stdout) {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

/// Logs go to stderr so stdout stays machine readable
fn init_logging(verbose: bool, json: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}
