use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::events::{AppEvent, event_loop};
use crate::pipeline::CaptureRequest;
use crate::sources::CaptureSources;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub requests: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub outcomes: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            requests: kanal::bounded_async(64),  // user triggers
            outcomes: kanal::bounded_async(256), // capture burst capacity
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    sources: CaptureSources,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, sources: CaptureSources) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            sources,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.sources.clone(),
            self.channels.requests.1.clone(),
            self.channels.outcomes.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Queue a capture and return its id
    pub async fn request_capture(&self, page_host: Option<String>) -> anyhow::Result<Uuid> {
        let request = CaptureRequest::new(page_host);
        let id = request.id;
        self.channels
            .requests
            .0
            .send(AppEvent::CaptureRequested(request))
            .await?;
        Ok(id)
    }

    pub fn outcomes(&self) -> AsyncReceiver<AppEvent> {
        self.channels.outcomes.1.clone()
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
