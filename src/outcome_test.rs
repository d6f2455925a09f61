use super::*;

#[test]
fn ok_returns_payload_only_on_success() {
    assert_eq!(Outcome::Success { data: 7 }.ok(), Some(7));
    assert_eq!(Outcome::<i32>::Transient { status: 502 }.ok(), None);
    assert_eq!(Outcome::<i32>::Application { message: "nope".into() }.ok(), None);
    assert_eq!(Outcome::<i32>::Transport { message: "reset".into() }.ok(), None);
}

#[test]
fn retryable_excludes_application_errors() {
    assert!(Outcome::<()>::Transient { status: 503 }.is_retryable());
    assert!(Outcome::<()>::Transport { message: "timeout".into() }.is_retryable());
    assert!(!Outcome::<()>::Application { message: "insufficient balance".into() }.is_retryable());
    assert!(!Outcome::<()>::Encode { message: "key must be a string".into() }.is_retryable());
    assert!(!Outcome::Success { data: () }.is_retryable());
}

#[test]
fn map_preserves_failure_variants() {
    let mapped = Outcome::<i32>::Application { message: "bad".into() }.map(|v| v * 2);
    assert_eq!(mapped, Outcome::Application { message: "bad".into() });

    let mapped = Outcome::<i32>::Encode { message: "bad key".into() }.map(|v| v * 2);
    assert_eq!(mapped, Outcome::Encode { message: "bad key".into() });

    let mapped = Outcome::Success { data: 21 }.map(|v| v * 2);
    assert_eq!(mapped, Outcome::Success { data: 42 });
}

#[test]
fn serializes_with_outcome_tag() {
    let value = serde_json::to_value(Outcome::<()>::Transient { status: 500 }).unwrap();
    assert_eq!(value, serde_json::json!({ "outcome": "transient", "status": 500 }));
}
