//! End-to-end handshake flows: orchestrator + HTTP lifecycle client + frame.

use passkey_handshake::{
    AttemptOutcome, AttemptState, AuthenticationOrchestrator, CorrelatedChannel, HandshakeError,
    HttpLifecycleClient, LifecycleApi,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::common::mock_frame::ScriptedFrame;
use crate::common::mock_upstream;
use crate::common::recording::RecordingPresenter;

fn http_lifecycle(base_url: &str) -> Arc<dyn LifecycleApi> {
    Arc::new(HttpLifecycleClient::new(
        Url::parse(base_url).expect("mock upstream URL"),
    ))
}

fn orchestrator(
    base_url: &str,
    frame: Arc<ScriptedFrame>,
    timeout: Duration,
) -> (AuthenticationOrchestrator, Arc<RecordingPresenter>) {
    let presenter = Arc::new(RecordingPresenter::new());
    let channel = CorrelatedChannel::with_timeout(frame, timeout);
    (
        AuthenticationOrchestrator::new(http_lifecycle(base_url), channel, presenter.clone()),
        presenter,
    )
}

#[tokio::test]
async fn test_full_attempt_succeeds_with_frame_security_token() {
    let upstream = mock_upstream::spawn().await;
    let frame = Arc::new(ScriptedFrame::new(vec![
        json!({"message": "ready"}),
        json!({"message": "authenticate", "data": {"token": "c1", "securityToken": "sec_abc"}}),
    ]));
    let (orchestrator, presenter) =
        orchestrator(&upstream.base_url, frame.clone(), Duration::from_secs(60));

    let outcome = orchestrator.authenticate("payer_1").await.unwrap();

    let issued = upstream.state.issued_ids.lock().unwrap().clone();
    assert_eq!(issued.len(), 1);
    match &outcome {
        AttemptOutcome::Succeeded {
            transaction_id,
            security_token,
            ..
        } => {
            assert_eq!(transaction_id, &issued[0]);
            assert_eq!(security_token, "sec_abc");
        }
        other => panic!("Expected Succeeded, got {other:?}"),
    }

    // The frame saw the transaction id minted by create
    let posted = frame.posted.lock().unwrap();
    assert_eq!(posted[0]["data"]["transactionId"], issued[0].as_str());
    assert_eq!(posted[0]["data"]["userId"], "payer_1");

    // Exactly one terminal outcome, ending in Succeeded
    assert_eq!(presenter.outcome_count(), 1);
    assert_eq!(
        presenter.states.lock().unwrap().last(),
        Some(&AttemptState::Succeeded)
    );
}

#[tokio::test]
async fn test_success_survives_close_endpoint_absence() {
    let upstream = mock_upstream::spawn().await;
    upstream
        .state
        .close_status
        .store(404, std::sync::atomic::Ordering::SeqCst);

    let frame = Arc::new(ScriptedFrame::new(vec![
        json!({"message": "authenticate", "data": {"token": "c1", "securityToken": "sec_abc"}}),
    ]));
    let (orchestrator, presenter) =
        orchestrator(&upstream.base_url, frame, Duration::from_secs(60));

    let outcome = orchestrator.authenticate("payer_1").await.unwrap();
    assert!(matches!(outcome, AttemptOutcome::Succeeded { .. }));
    assert_eq!(presenter.outcome_count(), 1);
}

#[tokio::test]
async fn test_cancelled_ceremony_yields_retriable_cancelled_outcome() {
    let upstream = mock_upstream::spawn().await;
    let frame = Arc::new(ScriptedFrame::new(vec![json!({"message": "cancelled"})]));
    let (orchestrator, presenter) =
        orchestrator(&upstream.base_url, frame, Duration::from_secs(60));

    let outcome = orchestrator.authenticate("payer_1").await.unwrap();
    assert!(matches!(outcome, AttemptOutcome::Cancelled));
    assert!(outcome.is_retriable());
    assert_eq!(
        *presenter.outcomes.lock().unwrap(),
        vec![AttemptState::Cancelled]
    );
}

#[tokio::test]
async fn test_silent_frame_times_out_and_late_reply_is_discarded() {
    let upstream = mock_upstream::spawn().await;
    let frame = Arc::new(ScriptedFrame::new(vec![json!({"message": "ready"})]));
    let (orchestrator, presenter) =
        orchestrator(&upstream.base_url, frame.clone(), Duration::from_millis(200));

    let outcome = orchestrator.authenticate("payer_1").await.unwrap();
    assert!(matches!(outcome, AttemptOutcome::TimedOut));
    assert!(outcome.is_retriable());
    assert_eq!(presenter.outcome_count(), 1);

    // A response arriving after the timeout has nowhere to go
    let port = frame.retained_port.lock().unwrap().take().unwrap();
    assert!(
        port.send(json!({"message": "authenticate", "data": {"token": "late"}}))
            .is_err()
    );
}

#[tokio::test]
async fn test_upstream_create_rejection_fails_the_attempt() {
    let upstream = mock_upstream::spawn().await;
    upstream
        .state
        .create_status
        .store(503, std::sync::atomic::Ordering::SeqCst);

    let frame = Arc::new(ScriptedFrame::new(vec![]));
    let (orchestrator, presenter) =
        orchestrator(&upstream.base_url, frame.clone(), Duration::from_secs(60));

    let outcome = orchestrator.authenticate("payer_1").await.unwrap();
    match &outcome {
        AttemptOutcome::Failed { error, .. } => {
            assert!(matches!(error, HandshakeError::Lifecycle(_)));
        }
        other => panic!("Expected Failed, got {other:?}"),
    }
    // The ceremony was never started
    assert!(frame.posted.lock().unwrap().is_empty());
    assert_eq!(presenter.outcome_count(), 1);
}

#[tokio::test]
async fn test_second_trigger_rejected_while_ceremony_pending() {
    let upstream = mock_upstream::spawn().await;
    let frame = Arc::new(ScriptedFrame::with_delay(
        vec![json!({"message": "authenticate", "data": {"token": "c1", "securityToken": "sec_abc"}})],
        Duration::from_millis(150),
    ));
    let (orchestrator, presenter) =
        orchestrator(&upstream.base_url, frame, Duration::from_secs(60));
    let orchestrator = Arc::new(orchestrator);

    let first = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.authenticate("payer_1").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let second = orchestrator.authenticate("payer_1").await;
    assert!(matches!(second, Err(HandshakeError::AlreadyInProgress)));

    let outcome = first.await.unwrap().unwrap();
    assert!(matches!(outcome, AttemptOutcome::Succeeded { .. }));
    assert_eq!(presenter.outcome_count(), 1);
}
