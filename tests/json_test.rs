//! Integration tests for validating untyped JSON payloads.

use pretty_assertions::assert_eq;
use regex::Regex;
use scrutiny::prelude::*;
use serde_json::{json, Value};
use stillwater::Validation;

fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
    v.into_result().unwrap_err()
}

fn signup_validator() -> Validator<(), Value> {
    Validator::new(|root: &Validatable<&Value>| {
        let email_pattern = Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap();

        let user = root.key("user");
        user.key("email").is_some();
        user.key("email").matches(&email_pattern);
        user.key("age").is_between(13.0..=130.0);

        for role in root.key("roles").elements() {
            role.is_not_blank();
        }
    })
}

#[test]
fn test_valid_payload() {
    let payload = json!({
        "user": { "email": "ada@example.org", "age": 36 },
        "roles": ["admin", "editor"]
    });

    assert!(signup_validator().validate(payload).is_success());
}

#[test]
fn test_invalid_payload_reports_paths() {
    let payload = json!({
        "user": { "email": "not-an-email", "age": 7 },
        "roles": ["admin", "  "]
    });

    let violations = unwrap_failure(signup_validator().validate(payload));
    let reported: Vec<(String, &str)> = violations
        .iter()
        .map(|v| (v.path.to_string(), v.message.as_str()))
        .collect();

    assert_eq!(
        reported,
        vec![
            (
                "user.email".to_string(),
                r"Must match the following pattern: ^[^@\s]+@[^@\s]+$"
            ),
            ("user.age".to_string(), "Must be between 13 and 130"),
            ("roles".to_string(), "Must not be blank"),
        ]
    );
}

#[test]
fn test_missing_members_are_absent() {
    let violations = unwrap_failure(signup_validator().validate(json!({})));

    let reported: Vec<(String, &str)> = violations
        .iter()
        .map(|v| (v.path.to_string(), v.message.as_str()))
        .collect();
    assert_eq!(
        reported,
        vec![("user.email".to_string(), "Must not be null")]
    );
}

#[test]
fn test_violations_render_as_json() {
    let violations = unwrap_failure(signup_validator().validate(json!({ "user": {} })));

    assert_eq!(
        violations.to_json(),
        json!([{
            "path": "user.email",
            "segments": ["user", "email"],
            "message": "Must not be null",
        }])
    );
}
