//! Saved (named) query tests

#[path = "testutils/mod.rs"]
mod testutils;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use tdquery::{Error, ErrorKind, JobId, NamedQueryOptions, TransportError};
use testutils::mock_engine::{EngineCall, MockEngine};
use testutils::test_fixture::TestFixture;

fn schedule_call(engine: &MockEngine) -> (String, String) {
    match &engine.calls()[0] {
        EngineCall::RunSchedule { name, time } => (name.clone(), time.clone()),
        other => panic!("unexpected first call: {:?}", other),
    }
}

#[tokio::test]
async fn test_named_query() {
    let fixture = TestFixture::new(MockEngine::new());

    let records = fixture
        .service
        .named_query("my_saved_query", &NamedQueryOptions::default())
        .await
        .expect("named query should succeed");

    assert_eq!(
        serde_json::to_value(&records).unwrap(),
        json!([{ "name": "page 1", "views": 100, "clicks": 10 }])
    );
    assert_eq!(
        fixture.engine.call_names(),
        vec!["run_schedule", "job_status", "show_job", "job_result"]
    );
    for call in &fixture.engine.calls()[1..] {
        match call {
            EngineCall::JobStatus(job_id) | EngineCall::ShowJob(job_id) => {
                assert_eq!(job_id, &JobId::from("123456"))
            }
            EngineCall::JobResult { job_id, .. } => assert_eq!(job_id, &JobId::from("123456")),
            other => panic!("unexpected call: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_default_schedule_time_is_now() {
    let fixture = TestFixture::new(MockEngine::new());

    let before = Utc::now();
    fixture
        .service
        .named_query("my_saved_query", &NamedQueryOptions::default())
        .await
        .unwrap();
    let after = Utc::now();

    let (name, time) = schedule_call(&fixture.engine);
    assert_eq!(name, "my_saved_query");
    assert!(time.ends_with('Z'), "not UTC ISO-8601: {}", time);

    let sent: DateTime<Utc> = DateTime::parse_from_rfc3339(&time)
        .expect("ISO-8601 timestamp")
        .with_timezone(&Utc);
    // Millisecond truncation can put the sent time just before `before`
    assert!(sent >= before - chrono::Duration::milliseconds(1));
    assert!(sent <= after);
}

#[tokio::test]
async fn test_explicit_schedule_time() {
    let fixture = TestFixture::new(MockEngine::new());
    let at = Utc.with_ymd_and_hms(2015, 12, 1, 0, 0, 0).unwrap();

    fixture
        .service
        .named_query("daily_rollup", &NamedQueryOptions::at(at))
        .await
        .unwrap();

    let (_, time) = schedule_call(&fixture.engine);
    assert_eq!(time, "2015-12-01T00:00:00.000Z");
}

#[tokio::test]
async fn test_first_of_many_jobs_is_followed() {
    let fixture = TestFixture::new(MockEngine::new().with_scheduled_jobs(&["111", "222", "333"]));

    fixture
        .service
        .named_query("fan_out", &NamedQueryOptions::default())
        .await
        .unwrap();

    assert!(fixture
        .engine
        .calls()
        .iter()
        .skip(1)
        .all(|call| match call {
            EngineCall::JobStatus(job_id) | EngineCall::ShowJob(job_id) => job_id.as_str() == "111",
            EngineCall::JobResult { job_id, .. } => job_id.as_str() == "111",
            _ => false,
        }));
}

#[tokio::test]
async fn test_no_jobs_triggered() {
    let fixture = TestFixture::new(MockEngine::new().with_scheduled_jobs(&[]));

    let err = fixture
        .service
        .named_query("nothing", &NamedQueryOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoJobsTriggered { ref name } if name == "nothing"));
    assert_eq!(err.kind(), ErrorKind::Submission);
    assert_eq!(fixture.engine.call_names(), vec!["run_schedule"]);
    assert_eq!(fixture.reporter.count(), 1);
}

#[tokio::test]
async fn test_schedule_transport_failure() {
    let fixture = TestFixture::new(MockEngine::new().with_schedule_error(TransportError::Http {
        status: 404,
        body: "schedule not found".to_string(),
    }));

    let err = fixture
        .service
        .named_query("missing", &NamedQueryOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Submission);
    let reports = fixture.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].context["name"], json!("missing"));
}
