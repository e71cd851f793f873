//! Integration tests for the video ingestion lifecycle.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;

use tubetalk::models::message::MessageAuthor;
use tubetalk::orchestrator::session::{SessionOrchestrator, SessionPhase};
use tubetalk::AppError;

use super::test_helpers::{spawn_ready_stub, spawn_stub, test_config, unreachable_base_url};

#[tokio::test]
async fn successful_submission_reaches_ready() {
    let stub = spawn_ready_stub(42).await;
    let session = SessionOrchestrator::new(&test_config(&stub.base_url)).expect("session builds");

    let result = session
        .request_ingestion("https://youtu.be/abc123")
        .await
        .expect("ingestion succeeds");

    assert_eq!(result.video_reference, "https://youtu.be/abc123");
    assert_eq!(result.segment_count, 42);
    assert_eq!(session.phase(), SessionPhase::ReadyForChat);

    let video = session.ingestion_result().expect("active video recorded");
    assert_eq!(video.segment_count, 42);
    stub.shutdown();
}

#[tokio::test]
async fn successful_submission_posts_a_confirmation() {
    let stub = spawn_ready_stub(7).await;
    let session = SessionOrchestrator::new(&test_config(&stub.base_url)).expect("session builds");

    session
        .request_ingestion("https://youtu.be/abc123")
        .await
        .expect("ingestion succeeds");

    let messages = session.messages();
    assert_eq!(messages.len(), 2, "greeting plus confirmation");
    let confirmation = &messages[1];
    assert_eq!(confirmation.author, MessageAuthor::Assistant);
    assert!(confirmation.content.contains("7 transcript segments"));
    stub.shutdown();
}

#[tokio::test]
async fn submission_sends_the_reference_on_the_wire() {
    let stub = spawn_ready_stub(3).await;
    let session = SessionOrchestrator::new(&test_config(&stub.base_url)).expect("session builds");

    session
        .request_ingestion("https://youtu.be/abc123")
        .await
        .expect("ingestion succeeds");

    let received = stub.received.lock().expect("request log lock");
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["videoReference"], "https://youtu.be/abc123");
    stub.shutdown();
}

#[tokio::test]
async fn remote_failure_rolls_back_to_idle() {
    let stub = spawn_stub(
        StatusCode::OK,
        serde_json::json!({ "success": false, "error": "no transcript available" }),
        Duration::ZERO,
    )
    .await;
    let session = SessionOrchestrator::new(&test_config(&stub.base_url)).expect("session builds");

    let err = session
        .request_ingestion("https://youtu.be/abc123")
        .await
        .expect_err("ingestion fails");

    match err {
        AppError::Ingestion(msg) => assert!(msg.contains("no transcript available")),
        other => panic!("expected ingestion error, got {other:?}"),
    }
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.ingestion_result().is_none());
    assert_eq!(session.messages().len(), 1, "failures leave the log alone");
    stub.shutdown();
}

#[tokio::test]
async fn remote_failure_without_detail_gets_a_generic_error() {
    let stub = spawn_stub(
        StatusCode::OK,
        serde_json::json!({ "success": false }),
        Duration::ZERO,
    )
    .await;
    let session = SessionOrchestrator::new(&test_config(&stub.base_url)).expect("session builds");

    let err = session
        .request_ingestion("https://youtu.be/abc123")
        .await
        .expect_err("ingestion fails");

    assert!(format!("{err}").contains("processing failed"));
    stub.shutdown();
}

#[tokio::test]
async fn success_without_segment_count_is_a_failure() {
    let stub = spawn_stub(
        StatusCode::OK,
        serde_json::json!({ "success": true }),
        Duration::ZERO,
    )
    .await;
    let session = SessionOrchestrator::new(&test_config(&stub.base_url)).expect("session builds");

    let result = session.request_ingestion("https://youtu.be/abc123").await;

    assert!(result.is_err());
    assert_eq!(session.phase(), SessionPhase::Idle);
    stub.shutdown();
}

#[tokio::test]
async fn unreachable_service_rolls_back_to_idle() {
    let base_url = unreachable_base_url().await;
    let session = SessionOrchestrator::new(&test_config(&base_url)).expect("session builds");

    let result = session.request_ingestion("https://youtu.be/abc123").await;

    assert!(result.is_err());
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.ingestion_result().is_none());
}

#[tokio::test]
async fn empty_reference_is_rejected_locally() {
    let stub = spawn_ready_stub(1).await;
    let session = SessionOrchestrator::new(&test_config(&stub.base_url)).expect("session builds");

    let err = session
        .request_ingestion("   ")
        .await
        .expect_err("empty reference rejected");

    match err {
        AppError::Rejected(_) => {}
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(
        stub.received.lock().expect("request log lock").is_empty(),
        "nothing should reach the service"
    );
    stub.shutdown();
}

#[tokio::test]
async fn busy_pipeline_rejects_a_second_submission() {
    let stub = spawn_stub(
        StatusCode::OK,
        serde_json::json!({ "success": true, "chunkCount": 5 }),
        Duration::from_millis(300),
    )
    .await;
    let session =
        Arc::new(SessionOrchestrator::new(&test_config(&stub.base_url)).expect("session builds"));

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.request_ingestion("https://youtu.be/first").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(session.phase(), SessionPhase::Ingesting);

    let err = session
        .request_ingestion("https://youtu.be/second")
        .await
        .expect_err("second submission rejected");
    match err {
        AppError::Rejected(msg) => assert!(msg.contains("already processing")),
        other => panic!("expected rejection, got {other:?}"),
    }

    let result = first
        .await
        .expect("task joins")
        .expect("first submission completes");
    assert_eq!(result.video_reference, "https://youtu.be/first");
    assert_eq!(session.phase(), SessionPhase::ReadyForChat);
    stub.shutdown();
}

#[tokio::test]
async fn ready_session_accepts_a_replacement_video() {
    let stub = spawn_ready_stub(9).await;
    let session = SessionOrchestrator::new(&test_config(&stub.base_url)).expect("session builds");

    session
        .request_ingestion("https://youtu.be/first")
        .await
        .expect("first ingestion succeeds");
    session
        .request_ingestion("https://youtu.be/second")
        .await
        .expect("replacement ingestion succeeds");

    let video = session.ingestion_result().expect("active video recorded");
    assert_eq!(video.video_reference, "https://youtu.be/second");
    stub.shutdown();
}
