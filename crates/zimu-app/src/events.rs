use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::capture_context::CaptureContext;
use crate::pipeline::{CaptureOrchestrator, CaptureOutcome, CaptureRequest};
use crate::sources::CaptureSources;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub enum AppEvent {
    CaptureRequested(CaptureRequest),
    CaptureFinished {
        request_id: Uuid,
        outcome: CaptureOutcome,
    },
}

/// App's main loop
///
/// Every capture runs on its own task so a slow recognizer never holds up
/// the next request.
pub async fn event_loop(
    state: Arc<AppState>,
    sources: CaptureSources,
    requests_rx: AsyncReceiver<AppEvent>,
    outcomes_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled, stopping");
                return Ok(());
            }
            event = requests_rx.recv() => event?,
        };

        match event {
            AppEvent::CaptureRequested(request) => {
                tracing::debug!("[EVENT_LOOP] Capture requested: {}", request.id);
                let ctx = CaptureContext::from_state(&state, &sources).await;
                let outcomes_tx = outcomes_tx.clone();
                tokio::spawn(async move {
                    let request_id = request.id;
                    let mut orchestrator = CaptureOrchestrator::new(ctx, request);
                    let outcome = orchestrator.run().await;
                    tracing::debug!("Capture {} visited {:?}", request_id, orchestrator.history());
                    let event = AppEvent::CaptureFinished {
                        request_id,
                        outcome,
                    };
                    if let Err(e) = outcomes_tx.send(event).await {
                        tracing::warn!("Dropping outcome of capture {}: {}", request_id, e);
                    }
                });
            }
            AppEvent::CaptureFinished { request_id, .. } => {
                // Outcomes flow the other way
                tracing::warn!("[EVENT_LOOP] Ignoring stray outcome for {}", request_id);
            }
        }
    }
}
