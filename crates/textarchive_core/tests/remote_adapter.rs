mod support;

use chrono::NaiveDate;
use support::{closed_endpoint, message_envelope, remote_config, spawn_stub, StubReply};
use textarchive_core::{Category, RemoteError, RemoteInferenceAdapter};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

#[tokio::test]
async fn infer_uses_remote_category_and_extracts_fields() {
    let content = "```json\n{\"type\": \"schedule\", \"confidence\": 0.92, \"reasoning\": \"time\"}\n```";
    let url = spawn_stub(StubReply::ok(message_envelope(content))).await;
    let adapter = RemoteInferenceAdapter::new(&remote_config(url)).unwrap();

    let result = adapter.infer("明天 14:30 团队会议", today()).await.unwrap();
    assert_eq!(result.category, Category::Event);
    assert_eq!(result.confidence, 0.92);
    assert!(!result.needs_manual_selection);

    let fields = result.extracted.as_event().expect("event fields");
    assert_eq!(fields.date(), Some("2025-01-11"));
    assert_eq!(fields.time(), Some("14:30"));
    assert_eq!(fields.description(), "团队会议");
}

#[tokio::test]
async fn infer_accepts_plural_messages_envelope() {
    let body = serde_json::json!({
        "choices": [{ "messages": { "content": "{\"type\":\"memo\",\"confidence\":0.55}" } }]
    })
    .to_string();
    let url = spawn_stub(StubReply::ok(body)).await;
    let adapter = RemoteInferenceAdapter::new(&remote_config(url)).unwrap();

    let result = adapter.infer("work idea: 整理项目笔记", today()).await.unwrap();
    assert_eq!(result.category, Category::Note);
    assert!(result.needs_manual_selection);
    let note = result.extracted.as_note().expect("note fields");
    assert_eq!(note.tags, vec!["work".to_string(), "idea".to_string()]);
}

#[tokio::test]
async fn non_success_status_is_unavailable() {
    let url = spawn_stub(StubReply::Respond {
        status: 503,
        body: "{}".to_string(),
    })
    .await;
    let adapter = RemoteInferenceAdapter::new(&remote_config(url)).unwrap();

    let err = adapter.infer("anything", today()).await.unwrap_err();
    assert!(matches!(err, RemoteError::Unavailable(ref msg) if msg.contains("503")), "{err}");
}

#[tokio::test]
async fn refused_connection_is_unavailable() {
    let adapter = RemoteInferenceAdapter::new(&remote_config(closed_endpoint().await)).unwrap();
    let err = adapter.infer("anything", today()).await.unwrap_err();
    assert!(matches!(err, RemoteError::Unavailable(_)), "{err}");
}

#[tokio::test]
async fn hanging_endpoint_times_out_as_unavailable() {
    let url = spawn_stub(StubReply::Hang).await;
    let adapter = RemoteInferenceAdapter::new(&remote_config(url)).unwrap();

    let err = adapter.infer("anything", today()).await.unwrap_err();
    assert!(matches!(err, RemoteError::Unavailable(_)), "{err}");
}

#[tokio::test]
async fn prose_reply_is_malformed() {
    let url = spawn_stub(StubReply::ok(message_envelope("I think this is a memo."))).await;
    let adapter = RemoteInferenceAdapter::new(&remote_config(url)).unwrap();

    let err = adapter.infer("anything", today()).await.unwrap_err();
    assert!(matches!(err, RemoteError::Malformed(_)), "{err}");
}

#[tokio::test]
async fn missing_confidence_is_malformed() {
    let url = spawn_stub(StubReply::ok(message_envelope("{\"type\":\"schedule\"}"))).await;
    let adapter = RemoteInferenceAdapter::new(&remote_config(url)).unwrap();

    let err = adapter.request_verdict("anything").await.unwrap_err();
    assert!(matches!(err, RemoteError::Malformed(_)), "{err}");
}
