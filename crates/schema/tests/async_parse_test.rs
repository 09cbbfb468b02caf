//! Async parsing: issue order must not depend on completion order.

use std::time::Duration;

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use sieve_schema::prelude::*;

fn slow_reject(delay_ms: u64, message: &'static str) -> Schema {
    string()
        .refine_async(
            move |_| async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                false
            },
            message,
        )
        .into()
}

fn paths(result: ParseResult) -> Vec<String> {
    match result {
        ParseResult::Failure(error) => error.issues().iter().map(Issue::dot_path).collect(),
        ParseResult::Success(value) => panic!("expected failure, got {value:?}"),
    }
}

#[rstest]
#[case::concurrent(true)]
#[case::sequential(false)]
#[tokio::test]
async fn object_issues_keep_declaration_order(#[case] concurrent: bool) {
    let schema = object([
        ("first", slow_reject(30, "first")),
        ("second", slow_reject(1, "second")),
        ("third", slow_reject(15, "third")),
    ]);
    let input = Value::from(json!({"first": "a", "second": "b", "third": "c"}));
    let options = ParseOptions::new().with_concurrent(concurrent);
    let result = schema.safe_parse_async_with(input, options).await.unwrap();
    assert_eq!(paths(result), vec!["first", "second", "third"]);
}

#[rstest]
#[case::concurrent(true)]
#[case::sequential(false)]
#[tokio::test]
async fn array_issues_keep_index_order(#[case] concurrent: bool) {
    let schema = array(slow_reject(5, "nope"));
    let input = Value::array(["a", "b", "c"].map(Value::from));
    let options = ParseOptions::new().with_concurrent(concurrent);
    let result = schema.safe_parse_async_with(input, options).await.unwrap();
    assert_eq!(paths(result), vec!["[0]", "[1]", "[2]"]);
}

#[tokio::test]
async fn union_reports_options_in_declaration_order() {
    let schema = union([slow_reject(20, "slow"), slow_reject(1, "fast")]);
    let result = schema.safe_parse_async("x").await.unwrap();
    let error = result.error().unwrap();
    let IssueKind::InvalidUnion { errors, .. } = &error.issues()[0].kind else {
        panic!("expected invalid_union");
    };
    let messages: Vec<_> = errors.iter().map(|branch| branch[0].message.as_str()).collect();
    assert_eq!(messages, vec!["slow", "fast"]);
}

#[tokio::test]
async fn async_transform_feeds_the_pipe() {
    let schema = string()
        .transform_async(|v| async move {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Value::from(v.as_str().map_or(0, str::len))
        })
        .pipe(number().max(3.0));
    assert_eq!(schema.parse_async("abc").await.unwrap(), Value::from(3));
    let failed = schema.safe_parse_async("abcd").await.unwrap();
    assert_eq!(failed.error().map(|e| e.issues()[0].code()), Some("too_big"));
}

#[tokio::test]
async fn sync_parse_rejects_async_steps_anywhere_in_the_tree() {
    let schema = object([("inner", array(slow_reject(1, "x")))]);
    let input = Value::from(json!({"inner": ["a"]}));
    assert_eq!(schema.safe_parse(input.clone()), Err(SchemaError::AsyncInSync));
    assert!(!schema.safe_parse_async(input).await.unwrap().is_success());
}
