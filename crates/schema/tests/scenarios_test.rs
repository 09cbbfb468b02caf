//! End-to-end parsing scenarios through the public API.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use sieve_schema::prelude::*;
use sieve_schema::foundation::Limit;
use sieve_value::Symbol;

fn issues(result: ParseResult) -> Vec<Issue> {
    match result {
        ParseResult::Failure(error) => error.into_issues(),
        ParseResult::Success(value) => panic!("expected failure, got {value:?}"),
    }
}

fn shapes() -> DiscriminatedUnionSchema {
    discriminated_union(
        "type",
        [
            object([("type", literal("a")), ("a", string().into())]),
            object([("type", literal("b")), ("b", string().into())]),
        ],
    )
    .unwrap()
}

// ============================================================================
// ARRAYS AND BOUNDS
// ============================================================================

#[test]
fn array_length_too_small() {
    let schema = string().array().min(2).max(2);
    let found = issues(schema.safe_parse(Value::array([Value::from("a")])).unwrap());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].code(), "too_small");
    assert!(found[0].path.is_empty());
    assert!(matches!(
        found[0].kind,
        IssueKind::TooSmall { minimum: Limit::Size(2), .. }
    ));
}

#[test]
fn tightest_bound_is_reported_once() {
    let found = issues(string().min(5).min(10).safe_parse("abcdefg").unwrap());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message, "Too small: expected string to have >=10 characters");
}

#[test]
fn sparse_arrays_report_holes() {
    let input = Value::array([Value::from(1), Value::Undefined, Value::from(3)]);
    let found = issues(number().array().safe_parse(input).unwrap());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].path, vec![PathSegment::Index(1)]);
    assert_eq!(found[0].message, "Invalid input: expected number, received undefined");
}

// ============================================================================
// DISCRIMINATED UNIONS
// ============================================================================

#[test]
fn discriminated_union_matches_tag() {
    let input = Value::from(json!({"type": "a", "a": "abc"}));
    let parsed = shapes().parse(input.clone()).unwrap();
    assert_eq!(parsed, input);
}

#[test]
fn discriminated_union_checks_only_tagged_option() {
    let found = issues(shapes().safe_parse(Value::from(json!({"type": "a", "b": "x"}))).unwrap());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].code(), "invalid_type");
    assert_eq!(found[0].dot_path(), "a");
}

#[test]
fn unknown_discriminator_is_one_issue() {
    let found = issues(shapes().safe_parse(Value::from(json!({"type": "c"}))).unwrap());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].dot_path(), "type");
    let IssueKind::InvalidUnion { errors, note } = &found[0].kind else {
        panic!("expected invalid_union");
    };
    assert!(errors.is_empty());
    assert_eq!(note.as_deref(), Some("No matching discriminator"));
}

#[test]
fn union_fallback_collects_every_option() {
    let schema = shapes().union_fallback();
    let found = issues(schema.safe_parse(Value::from(json!({"type": "c"}))).unwrap());
    assert_eq!(found.len(), 1);
    let IssueKind::InvalidUnion { errors, .. } = &found[0].kind else {
        panic!("expected invalid_union");
    };
    assert_eq!(errors.len(), 2);
}

#[test]
fn ambiguous_discriminators_fail_to_build() {
    let err = discriminated_union(
        "type",
        [
            object([("type", literal("a"))]),
            object([("type", literal("a"))]),
        ],
    )
    .unwrap_err();
    assert_eq!(err.code(), "SCHEMA_DUPLICATE_DISCRIMINATOR");

    let err = discriminated_union("type", [object([("type", string())])]).unwrap_err();
    assert_eq!(err.code(), "SCHEMA_INVALID_DISCRIMINATED_UNION");
}

// ============================================================================
// MODIFIERS
// ============================================================================

#[test]
fn catch_substitutes_and_drops_issues() {
    assert_eq!(string().catch("default").parse(42).unwrap(), Value::from("default"));
    let seen = string()
        .catch_with(|ctx| Value::from(ctx.issues().len()))
        .parse(42)
        .unwrap();
    assert_eq!(seen, Value::from(1));
}

#[test]
fn default_value_runs_through_the_pipeline() {
    let long = string().refine(|v| v.as_str().is_some_and(|s| s.len() > 3), "too short");
    assert_eq!(long.default("abcd").parse(Value::Undefined).unwrap(), Value::from("abcd"));
    let found = issues(long.default("ab").safe_parse(Value::Undefined).unwrap());
    assert_eq!(found[0].message, "too short");
}

#[test]
fn prefault_goes_through_transforms() {
    let upper = string().to_upper_case().prefault("abc");
    assert_eq!(upper.parse(Value::Undefined).unwrap(), Value::from("ABC"));
}

#[test]
fn nonoptional_has_its_own_issue() {
    let found = issues(string().optional().nonoptional().safe_parse(Value::Undefined).unwrap());
    assert_eq!(found[0].message, "Invalid input: expected nonoptional, received undefined");
}

#[test]
fn readonly_freezes_output() {
    let out = object([("a", number())])
        .readonly()
        .parse(Value::from(json!({"a": 1})))
        .unwrap();
    assert!(out.is_frozen());
}

#[test]
fn brand_changes_nothing() {
    let input = Value::from("x");
    assert_eq!(string().brand().parse(input.clone()).unwrap(), input);
}

// ============================================================================
// OBJECTS
// ============================================================================

#[test]
fn strict_rejects_loose_keeps() {
    let input = Value::from(json!({"name": "x", "z": 1}));
    let found = issues(strict_object([("name", string())]).safe_parse(input.clone()).unwrap());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, IssueKind::UnrecognizedKeys { keys: vec!["z".into()] });

    let kept = loose_object([("name", string())]).parse(input.clone()).unwrap();
    assert_eq!(kept, input);

    let stripped = object([("name", string())]).parse(input).unwrap();
    assert_eq!(stripped, Value::from(json!({"name": "x"})));
}

#[test]
fn object_issues_follow_declaration_order() {
    let schema = object([("a", string()), ("b", string())]);
    let found = issues(schema.safe_parse(Value::from(json!({"b": 1, "a": 2}))).unwrap());
    let paths: Vec<_> = found.iter().map(Issue::dot_path).collect();
    assert_eq!(paths, vec!["a", "b"]);
}

#[test]
fn proto_keys_never_reach_the_output() {
    let input = Value::from(json!({"__proto__": {"admin": true}, "a": "x"}));
    let out = loose_object([("a", string())]).parse(input).unwrap();
    assert_eq!(out.get("__proto__"), None);
    assert_eq!(out.get("a"), Some(&Value::from("x")));
}

// ============================================================================
// MAPS, RECORDS, INTERSECTIONS
// ============================================================================

#[test]
fn map_key_and_value_issues_share_the_key_path() {
    let input = Value::map([(Value::from(42), Value::from(Symbol::anonymous()))]);
    let found = issues(map(string(), number()).safe_parse(input).unwrap());
    assert_eq!(found.len(), 2);
    for issue in &found {
        assert_eq!(issue.code(), "invalid_type");
        assert_eq!(issue.path, vec![PathSegment::Index(42)]);
    }
    assert_eq!(found[0].message, "Invalid input: expected string, received number");
    assert_eq!(found[1].message, "Invalid input: expected number, received symbol");
}

#[test]
fn enum_keyed_records_are_exhaustive() {
    let schema = record(enumeration(["a", "b"]), number());
    let found = issues(schema.safe_parse(Value::from(json!({"a": 1, "c": 2}))).unwrap());
    let codes: Vec<_> = found.iter().map(Issue::code).collect();
    assert_eq!(codes, vec!["invalid_type", "unrecognized_keys"]);
    assert_eq!(found[0].dot_path(), "b");
}

#[test]
fn conflicting_intersections_are_schema_errors() {
    let left = string().transform(|_, _| Value::from("left"));
    let right = string().transform(|_, _| Value::from("right"));
    let err = intersection(left, right).safe_parse("x").unwrap_err();
    assert_eq!(err.code(), "SCHEMA_UNMERGEABLE_INTERSECTION");

    let merged = intersection(
        object([("a", string())]),
        object([("b", number())]),
    )
    .parse(Value::from(json!({"a": "x", "b": 1})))
    .unwrap();
    assert_eq!(merged, Value::from(json!({"a": "x", "b": 1})));
}

// ============================================================================
// PIPELINE
// ============================================================================

#[rstest]
#[case(Params::new().message("first"), 2)]
#[case(Params::new().message("first").abort(), 1)]
fn abort_skips_later_checks(#[case] first: Params, #[case] expected: usize) {
    let schema = string()
        .refine(|_| false, first)
        .refine(|_| false, "second");
    assert_eq!(issues(schema.safe_parse("x").unwrap()).len(), expected);
}

#[test]
fn refinement_paths_and_super_refine() {
    let schema = object([("password", string()), ("confirm", string())]).refine(
        |v| v.get("password") == v.get("confirm"),
        Params::new().message("passwords differ").path(["confirm"]),
    );
    let found = issues(
        schema
            .safe_parse(Value::from(json!({"password": "a", "confirm": "b"})))
            .unwrap(),
    );
    assert_eq!(found[0].dot_path(), "confirm");

    let many = number().super_refine(|v, ctx| {
        if v.as_f64().is_some_and(|n| n > 10.0) {
            ctx.add_issue("too large");
            ctx.add_issue("really too large");
        }
    });
    assert_eq!(issues(many.safe_parse(11).unwrap()).len(), 2);
}

#[test]
fn pipe_and_preprocess() {
    let length = string()
        .transform(|v, _| Value::from(v.as_str().map_or(0, str::len)))
        .pipe(number().min(2.0));
    assert_eq!(length.parse("abc").unwrap(), Value::from(3));
    assert_eq!(issues(length.safe_parse("a").unwrap())[0].code(), "too_small");

    let trimmed = preprocess(
        |v, _| match v.as_str() {
            Some(s) => Value::from(s.trim()),
            None => v,
        },
        string().min(1),
    );
    assert_eq!(trimmed.parse("  x ").unwrap(), Value::from("x"));
}

#[test]
fn coercion_runs_before_the_check() {
    use sieve_schema::validators::coerce;
    assert_eq!(coerce::number().parse("12").unwrap(), Value::from(12));
    assert_eq!(coerce::string().parse(5).unwrap(), Value::from("5"));
    assert_eq!(coerce::boolean().parse(0).unwrap(), Value::from(false));
}

#[test]
fn recursive_schemas_validate_to_any_depth() {
    let category = recursive(|this| {
        object([
            ("name", Schema::from(string())),
            ("children", this.array().into()),
        ])
    });
    let input = Value::from(json!({
        "name": "root",
        "children": [{"name": "leaf", "children": [{"name": 1, "children": []}]}]
    }));
    let found = issues(category.safe_parse(input).unwrap());
    assert_eq!(found[0].dot_path(), "children[0].children[0].name");
}

// ============================================================================
// RESULT FORMATTERS
// ============================================================================

#[test]
fn formatters_agree_on_locations() {
    let schema = object([("user", object([("email", string().email())]))]);
    let err = schema
        .parse(Value::from(json!({"user": {"email": "nope"}})))
        .unwrap_err();
    let error = err.as_validation().unwrap();
    assert_eq!(
        error.prettify(),
        "✖ Invalid email address\n  → at user.email"
    );
    assert_eq!(error.flatten().field_errors["user"], vec!["Invalid email address".to_owned()]);
    let tree = error.treeify();
    assert_eq!(
        tree.property("user").and_then(|t| t.property("email")).map(|t| t.errors.clone()),
        Some(vec!["Invalid email address".to_owned()])
    );
}
