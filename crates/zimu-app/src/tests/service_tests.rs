use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use zimu_config::Config;
use zimu_ocr::{PlaceholderEngine, RecognitionEngine};
use zimu_types::AbortReason;

use super::*;
use crate::controller::AppController;
use crate::display::LatestCapture;
use crate::events::{AppEvent, event_loop};
use crate::pipeline::{CaptureOutcome, CaptureRequest};
use crate::sources::CaptureSources;
use crate::state::AppState;

fn app_state(recognizer: Arc<dyn RecognitionEngine>) -> Arc<AppState> {
    Arc::new(AppState::with_components(
        Config::default(),
        Arc::new(ChineseProcessor::new()),
        recognizer,
        None,
    ))
}

fn sources(paused: bool) -> CaptureSources {
    CaptureSources::new(
        SolidFrames {
            width: 100,
            height: 100,
        },
        StaticCaption::new(Some(snapshot(10, 10, 40, 20, "你好！"))),
        FixedPlayback::new(paused),
    )
}

async fn next_finished(rx: &kanal::AsyncReceiver<AppEvent>) -> (uuid::Uuid, CaptureOutcome) {
    match timeout(Duration::from_secs(5), rx.recv()).await {
        Ok(Ok(AppEvent::CaptureFinished {
            request_id,
            outcome,
        })) => (request_id, outcome),
        Ok(Ok(_)) => panic!("Wrong event type"),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - capture never finished"),
    }
}

#[tokio::test]
async fn test_event_loop_answers_each_request() {
    let (requests_tx, requests_rx) = kanal::bounded_async::<AppEvent>(8);
    let (outcomes_tx, outcomes_rx) = kanal::bounded_async::<AppEvent>(8);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(event_loop(
        app_state(Arc::new(PlaceholderEngine)),
        sources(true),
        requests_rx,
        outcomes_tx,
        cancel.clone(),
    ));

    let request = CaptureRequest::new(Some("www.youtube.com".to_string()));
    let id = request.id;
    requests_tx
        .send(AppEvent::CaptureRequested(request))
        .await
        .unwrap();

    let (request_id, outcome) = next_finished(&outcomes_rx).await;
    assert_eq!(request_id, id);
    assert_eq!(outcome.record().unwrap().raw_text, "你好！");

    cancel.cancel();
    let result = timeout(Duration::from_secs(2), handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
}

#[tokio::test]
async fn test_event_loop_exits_when_requests_close() {
    let (requests_tx, requests_rx) = kanal::bounded_async::<AppEvent>(8);
    let (outcomes_tx, _outcomes_rx) = kanal::bounded_async::<AppEvent>(8);

    let handle = tokio::spawn(event_loop(
        app_state(Arc::new(PlaceholderEngine)),
        sources(true),
        requests_rx,
        outcomes_tx,
        CancellationToken::new(),
    ));

    drop(requests_tx);
    let result = timeout(Duration::from_secs(2), handle).await;
    assert!(matches!(result, Ok(Ok(Err(_)))));
}

#[tokio::test]
async fn test_concurrent_captures_do_not_wait_on_each_other() {
    let state = app_state(Arc::new(SlowEngine {
        delay: Duration::from_millis(800),
    }));
    let controller = AppController::new(state, sources(true));
    let _tasks = controller.spawn_tasks();
    let outcomes = controller.outcomes();

    let mut ids = HashSet::new();
    for _ in 0..4 {
        ids.insert(
            controller
                .request_capture(Some("www.youtube.com".to_string()))
                .await
                .unwrap(),
        );
    }

    // Four sequential runs would need 3.2s
    let finished = timeout(Duration::from_millis(2500), async {
        let mut finished = HashSet::new();
        while finished.len() < 4 {
            let (id, outcome) = next_finished(&outcomes).await;
            assert_eq!(outcome.record().unwrap().raw_text, "好");
            finished.insert(id);
        }
        finished
    })
    .await
    .expect("captures ran one after another");

    assert_eq!(finished, ids);
    controller.shutdown();
}

#[tokio::test]
async fn test_superseded_outcome_is_discarded() {
    let state = app_state(Arc::new(SlowEngine {
        delay: Duration::from_millis(100),
    }));
    let controller = AppController::new(state, sources(true));
    let _tasks = controller.spawn_tasks();
    let outcomes = controller.outcomes();
    let mut display = LatestCapture::new();

    let first = controller
        .request_capture(Some("www.youtube.com".to_string()))
        .await
        .unwrap();
    display.requested(first);
    let second = controller
        .request_capture(Some("www.youtube.com".to_string()))
        .await
        .unwrap();
    display.requested(second);

    let mut shown = Vec::new();
    for _ in 0..2 {
        let (id, outcome) = next_finished(&outcomes).await;
        if display.accept(id, outcome).is_some() {
            shown.push(id);
        }
    }

    assert_eq!(shown, vec![second]);
    controller.shutdown();
}

#[tokio::test]
async fn test_aborted_capture_is_reported() {
    let controller = AppController::new(app_state(Arc::new(PlaceholderEngine)), sources(false));
    let _tasks = controller.spawn_tasks();

    let id = controller
        .request_capture(Some("www.youtube.com".to_string()))
        .await
        .unwrap();
    let (request_id, outcome) = next_finished(&controller.outcomes()).await;

    assert_eq!(request_id, id);
    assert_eq!(
        outcome.abort_notice().unwrap().reason,
        AbortReason::VideoNotPaused
    );
    controller.shutdown();
}

#[tokio::test]
async fn test_shutdown_stops_event_loop() {
    let controller = AppController::new(app_state(Arc::new(PlaceholderEngine)), sources(true));
    let mut tasks = controller.spawn_tasks();

    controller.shutdown();
    let joined = timeout(Duration::from_secs(2), tasks.join_next())
        .await
        .expect("event loop ignored shutdown");

    assert!(matches!(joined, Some(Ok(Ok(())))));
}
