mod common;

use common::{client, ScriptedBackend, BASIC};
use exam_analyzer::error::{AnalysisError, RemoteFailure};
use exam_analyzer::models::{AnalysisProfile, JobStatus, ProfileKind};
use serde_json::json;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn basic_profile() -> AnalysisProfile {
    AnalysisProfile::new(ProfileKind::Basic, BASIC)
}

#[tokio::test]
async fn test_polls_until_completed_then_parses_reply() {
    let backend = ScriptedBackend::new().with_profile(
        BASIC,
        vec![JobStatus::Pending, JobStatus::Running, JobStatus::Running, JobStatus::Completed],
        Some("```json\n{\"total_questions\": 5}\n```"),
    );
    let client = client(backend, Duration::from_secs(5));

    let ctx = assert_ok!(client.create_context().await);
    let record = assert_ok!(client.run_profile(&ctx, &basic_profile(), "exam text").await);

    assert_eq!(serde_json::Value::Object(record), json!({"total_questions": 5}));
}

#[tokio::test]
async fn test_each_call_appends_one_message_and_one_run() {
    let backend = ScriptedBackend::new().completing(BASIC, "{\"grade\": \"1\"}");
    let client = client(backend, Duration::from_secs(5));

    let ctx = client.create_context().await.unwrap();
    assert_ok!(client.run_profile(&ctx, &basic_profile(), "first").await);

    let backend = client.backend();
    assert_eq!(backend.messages(), vec![(ctx.thread_id.clone(), "first".to_string())]);
    assert_eq!(backend.runs_started(), vec![(ctx.thread_id.clone(), BASIC.to_string())]);
}

#[tokio::test]
async fn test_terminal_failure_is_remote_failure() {
    for terminal in [JobStatus::Failed, JobStatus::Expired, JobStatus::Cancelled] {
        let backend =
            ScriptedBackend::new().with_profile(BASIC, vec![JobStatus::Running, terminal], Some("{}"));
        let client = client(backend, Duration::from_secs(5));
        let ctx = client.create_context().await.unwrap();

        let err = assert_err!(client.run_profile(&ctx, &basic_profile(), "text").await);
        match err {
            AnalysisError::RemoteFailure(RemoteFailure::Terminal { status, .. }) => {
                assert_eq!(status, terminal)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_never_terminating_run_times_out() {
    let backend = ScriptedBackend::new().with_profile(BASIC, vec![JobStatus::Running], Some("{}"));
    let client = client(backend, Duration::from_millis(20));
    let ctx = client.create_context().await.unwrap();

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        client.run_profile(&ctx, &basic_profile(), "text"),
    )
    .await
    .expect("轮询必须在自身时限内结束");

    assert!(matches!(result, Err(AnalysisError::Timeout { .. })));
}

#[tokio::test]
async fn test_missing_assistant_message_is_empty_response() {
    let backend = ScriptedBackend::new().with_profile(BASIC, vec![JobStatus::Completed], None);
    let client = client(backend, Duration::from_secs(5));
    let ctx = client.create_context().await.unwrap();

    let err = assert_err!(client.run_profile(&ctx, &basic_profile(), "text").await);
    assert!(matches!(err, AnalysisError::EmptyResponse { ref thread_id } if *thread_id == ctx.thread_id));
}

#[tokio::test]
async fn test_reply_without_json_is_parse_failure() {
    let backend = ScriptedBackend::new().completing(BASIC, "죄송합니다. 분석할 수 없습니다.");
    let client = client(backend, Duration::from_secs(5));
    let ctx = client.create_context().await.unwrap();

    let err = assert_err!(client.run_profile(&ctx, &basic_profile(), "text").await);
    assert!(matches!(err, AnalysisError::ParseFailure { .. }));
}

#[tokio::test]
async fn test_start_run_error_propagates() {
    let backend = ScriptedBackend::new();
    let client = client(backend, Duration::from_secs(5));
    let ctx = client.create_context().await.unwrap();

    let err = assert_err!(client.run_profile(&ctx, &basic_profile(), "text").await);
    assert!(matches!(
        err,
        AnalysisError::RemoteFailure(RemoteFailure::BadResponse { status: 404, .. })
    ));
}
