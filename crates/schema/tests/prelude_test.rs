//! The prelude and the `object!` macro.

use pretty_assertions::assert_eq;
use serde_json::json;
use sieve_schema::prelude::*;

#[test]
fn object_macro_matches_the_constructor() {
    let from_macro = object! {
        "name" => string().min(1),
        "age" => number().int().nonnegative().optional(),
    };
    let from_fn = object([
        ("name", Schema::from(string().min(1))),
        ("age", number().int().nonnegative().optional()),
    ]);

    let input = Value::from(json!({"name": "ada", "age": 36, "extra": true}));
    assert_eq!(from_macro.parse(input.clone()).unwrap(), from_fn.parse(input).unwrap());
    let keys: Vec<String> = from_macro.shape().keys().cloned().collect();
    assert_eq!(keys, vec!["name".to_owned(), "age".to_owned()]);
}

#[test]
fn object_macro_accepts_trailing_comma_and_nesting() {
    let schema = object! {
        "user" => object! { "id" => string().uuid(), },
    };
    let found = schema
        .safe_parse(Value::from(json!({"user": {"id": "nope"}})))
        .unwrap();
    let error = found.error().unwrap();
    assert_eq!(error.issues()[0].dot_path(), "user.id");
    assert_eq!(error.issues()[0].code(), "invalid_format");
}

#[test]
fn prelude_covers_a_typical_form() {
    let signup = object! {
        "email" => string().trim().email(),
        "password" => string().min(8),
        "plan" => enumeration(["free", "pro"]).default("free"),
    }
    .strict();

    let ok = signup
        .parse(Value::from(json!({"email": "  a@b.co ", "password": "hunter22"})))
        .unwrap();
    assert_eq!(ok, Value::from(json!({"email": "a@b.co", "password": "hunter22", "plan": "free"})));

    let bad = signup
        .safe_parse(Value::from(json!({"email": "x", "password": "short", "admin": true})))
        .unwrap();
    let codes: Vec<_> = bad.error().unwrap().issues().iter().map(Issue::code).collect();
    assert_eq!(codes, vec!["invalid_format", "too_small", "unrecognized_keys"]);
}
