mod support;

use std::collections::HashMap;

use axum::http::StatusCode;
use jornageo::{
    application::{
        content::METRIC_CONTENT_LOAD_FAILURES, registration::METRIC_REGISTRATION_SUBMISSIONS,
        render::RenderOptions,
    },
    infra::telemetry,
};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use support::{DOCUMENT, StubEndpoint, app_context, offline_endpoint, write_document};

#[tokio::test]
async fn submissions_and_content_failures_emit_expected_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");
    telemetry::describe_metrics();

    let stub = StubEndpoint::spawn(StatusCode::OK, "{}").await;
    let dir = tempfile::tempdir().expect("temp dir");
    let app = app_context(
        write_document(dir.path(), DOCUMENT),
        stub.url.clone(),
        RenderOptions::default(),
    );

    let valid = vec![
        ("name".to_string(), "Ana".to_string()),
        ("email".to_string(), "ana@ufpr.br".to_string()),
        ("management_area".to_string(), "Planejamento".to_string()),
    ];
    assert!(app.register(valid.clone()).await.outcome.is_accepted());
    assert_eq!(
        app.register(vec![("email".into(), "x".into())])
            .await
            .outcome
            .kind(),
        "invalid"
    );

    // Missing document: baseline rules, unreachable endpoint.
    let broken = app_context(
        dir.path().join("missing.json"),
        offline_endpoint().await,
        RenderOptions::default(),
    );
    assert!(broken.landing_page().await.slots.is_empty());
    assert_eq!(broken.register(valid).await.outcome.kind(), "failed");

    let mut submissions = HashMap::new();
    let mut content_failures = 0;
    for (composite_key, unit, _, value) in snapshotter.snapshot().into_vec() {
        let key = composite_key.key();
        let DebugValue::Counter(count) = value else {
            continue;
        };
        if key.name() == METRIC_REGISTRATION_SUBMISSIONS {
            assert_eq!(unit, Some(metrics::Unit::Count));
            let outcome = key
                .labels()
                .find(|label| label.key() == "outcome")
                .map(|label| label.value().to_string())
                .expect("submission counter carries an outcome label");
            submissions.insert(outcome, count);
        } else if key.name() == METRIC_CONTENT_LOAD_FAILURES {
            content_failures += count;
        }
    }

    assert_eq!(submissions.get("accepted"), Some(&1));
    assert_eq!(submissions.get("invalid"), Some(&1));
    assert_eq!(submissions.get("failed"), Some(&1));
    assert_eq!(submissions.get("rejected"), None);
    // One for the page, one for the registration attempt.
    assert_eq!(content_failures, 2);
}
