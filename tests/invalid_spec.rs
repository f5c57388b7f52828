use rundag::spec::{JobEntry, normalize};
use rundag::{ScheduleError, SpecValue, schedule};
use rundag_test_utils::builders::{SpecBuilder, detailed};
use rundag_test_utils::recorder::Recorder;
use rundag_test_utils::with_timeout;

fn assert_invalid(result: Result<Vec<String>, ScheduleError>, what: &str) {
    match result {
        Err(ScheduleError::InvalidJobObject { .. }) => {}
        other => panic!("{what}: expected InvalidJobObject, got {other:?}"),
    }
}

#[tokio::test]
async fn specification_that_is_not_a_record_is_rejected() {
    let rec = Recorder::new();
    let cases = vec![
        ("null", SpecValue::Null),
        ("string", SpecValue::from("string")),
        ("number", SpecValue::Number(3.0)),
        ("boolean", SpecValue::Bool(true)),
        (
            "list",
            SpecValue::list([SpecValue::record([("a", SpecValue::Job(rec.job()))])]),
        ),
        ("bare job", SpecValue::Job(rec.job())),
    ];

    for (what, spec) in cases {
        assert_invalid(with_timeout(schedule(spec)).await, what);
    }
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn record_with_only_a_job_key_is_rejected() {
    let rec = Recorder::new();
    let spec = SpecBuilder::new()
        .bare("a", rec.job())
        .raw("x", SpecValue::record([("job", SpecValue::Job(rec.job()))]))
        .build();

    assert_invalid(with_timeout(schedule(spec)).await, "job-only record");
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn entry_that_is_neither_job_nor_record_is_rejected() {
    let rec = Recorder::new();
    let cases = vec![
        ("string", SpecValue::from("string")),
        ("number", SpecValue::Number(4.0)),
        ("boolean", SpecValue::Bool(true)),
        ("set", SpecValue::Set(Vec::new())),
        ("map", SpecValue::Map(Vec::new())),
        ("list", SpecValue::List(Vec::new())),
        ("null", SpecValue::Null),
    ];

    for (what, value) in cases {
        let spec = SpecBuilder::new()
            .bare("x", rec.job())
            .raw("key", value)
            .build();
        assert_invalid(with_timeout(schedule(spec)).await, what);
    }
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn after_that_is_not_a_list_of_names_is_rejected() {
    let rec = Recorder::new();
    let cases = vec![
        ("string", SpecValue::from("x")),
        ("number", SpecValue::Number(1.0)),
        ("boolean", SpecValue::Bool(false)),
        ("set", SpecValue::Set(vec![SpecValue::from("x")])),
        (
            "map",
            SpecValue::Map(vec![(SpecValue::from("x"), SpecValue::Bool(true))]),
        ),
        ("nested list", SpecValue::list([SpecValue::names(&["x"])])),
        ("list of numbers", SpecValue::list([SpecValue::Number(1.0)])),
        ("record", SpecValue::record([("x", SpecValue::from("x"))])),
        ("null", SpecValue::Null),
    ];

    for (what, after) in cases {
        let spec = SpecBuilder::new()
            .bare("x", rec.job())
            .raw("a", detailed(after, rec.job()))
            .build();
        assert_invalid(with_timeout(schedule(spec)).await, what);
    }
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn non_callable_job_is_rejected() {
    let spec = SpecBuilder::new()
        .raw(
            "a",
            SpecValue::record([
                ("after", SpecValue::names::<&str>(&[])),
                ("job", SpecValue::from("echo a")),
            ]),
        )
        .build();

    assert_invalid(with_timeout(schedule(spec)).await, "string job");
}

#[tokio::test]
async fn record_with_extra_keys_is_rejected() {
    let rec = Recorder::new();
    let spec = SpecBuilder::new()
        .raw(
            "a",
            SpecValue::record([
                ("after", SpecValue::names::<&str>(&[])),
                ("job", SpecValue::Job(rec.job())),
                ("retries", SpecValue::Number(3.0)),
            ]),
        )
        .build();

    let result = with_timeout(schedule(spec)).await;

    match result {
        Err(ScheduleError::InvalidJobObject { reason }) => {
            assert!(reason.contains("retries"), "reason: {reason}");
        }
        other => panic!("expected InvalidJobObject, got {other:?}"),
    }
}

#[test]
fn record_missing_job_is_rejected() {
    let spec = SpecBuilder::new()
        .raw("a", SpecValue::record([("after", SpecValue::names(&["b"]))]))
        .build();

    assert!(matches!(
        normalize(spec),
        Err(ScheduleError::InvalidJobObject { .. })
    ));
}

#[test]
fn normalize_keeps_bare_and_detailed_forms() -> Result<(), ScheduleError> {
    let rec = Recorder::new();
    let spec = SpecBuilder::new()
        .bare("a", rec.job())
        .after("b", &["a", "c"], rec.job())
        .build();

    let jobs = normalize(spec)?;

    assert!(matches!(jobs.get("a"), Some(JobEntry::Bare(_))));
    let b = jobs.get("b").map(|e| e.after().to_vec()).unwrap_or_default();
    assert_eq!(b, vec!["a".to_string(), "c".to_string()]);
    Ok(())
}

#[test]
fn validation_errors_are_flagged_as_such() {
    let err = ScheduleError::invalid("bad");
    assert!(err.is_validation());
    assert!(ScheduleError::NoStart.is_validation());
    assert!(!ScheduleError::UnknownJob("x".into()).is_validation());
}
