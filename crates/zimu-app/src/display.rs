use uuid::Uuid;

use crate::pipeline::CaptureOutcome;

/// Last-result-wins filter in front of the overlay
///
/// Captures are never cancelled; an outcome is shown only if no newer
/// capture was requested in the meantime.
#[derive(Debug, Default)]
pub struct LatestCapture {
    latest: Option<Uuid>,
}

impl LatestCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requested(&mut self, id: Uuid) {
        self.latest = Some(id);
    }

    /// The outcome to display, if `id` is still the newest request
    pub fn accept(&self, id: Uuid, outcome: CaptureOutcome) -> Option<CaptureOutcome> {
        if self.latest == Some(id) {
            Some(outcome)
        } else {
            tracing::debug!("Discarding superseded capture {}", id);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zimu_types::{AbortNotice, AbortReason, CaptureState};

    fn aborted() -> CaptureOutcome {
        CaptureOutcome::Aborted(AbortNotice {
            reason: AbortReason::VideoNotPaused,
            state: CaptureState::Idle,
        })
    }

    #[test]
    fn test_only_latest_is_accepted() {
        let mut display = LatestCapture::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        display.requested(first);
        display.requested(second);

        assert!(display.accept(first, aborted()).is_none());
        assert!(display.accept(second, aborted()).is_some());
    }

    #[test]
    fn test_nothing_requested() {
        let display = LatestCapture::new();
        assert!(display.accept(Uuid::new_v4(), aborted()).is_none());
    }
}
