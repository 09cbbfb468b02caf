//! Property-based tests for sieve-schema.

use proptest::prelude::*;
use sieve_schema::prelude::*;

fn outcome(schema: &impl SchemaType, input: Value) -> (bool, Vec<String>) {
    match schema.safe_parse(input) {
        Ok(ParseResult::Success(_)) => (true, Vec::new()),
        Ok(ParseResult::Failure(error)) => {
            (false, error.issues().iter().map(|i| i.message.clone()).collect())
        }
        Err(err) => (false, vec![err.to_string()]),
    }
}

// ============================================================================
// BOUND TIGHTENING: min(a).min(b) == min(max(a, b))
// ============================================================================

proptest! {
    #[test]
    fn string_min_order_independent(a in 0usize..20, b in 0usize..20, s in "[a-z]{0,25}") {
        let chained = string().min(a).min(b);
        let direct = string().min(a.max(b));
        prop_assert_eq!(
            outcome(&chained, Value::from(s.as_str())),
            outcome(&direct, Value::from(s.as_str()))
        );
        prop_assert_eq!(chained.min_length(), Some(a.max(b)));
    }

    #[test]
    fn string_max_order_independent(a in 0usize..20, b in 0usize..20, s in "[a-z]{0,25}") {
        let chained = string().max(a).max(b);
        let direct = string().max(a.min(b));
        prop_assert_eq!(
            outcome(&chained, Value::from(s.as_str())),
            outcome(&direct, Value::from(s.as_str()))
        );
    }

    #[test]
    fn number_bounds_order_independent(a in -100i32..100, b in -100i32..100, n in -200i32..200) {
        let (a, b) = (f64::from(a), f64::from(b));
        let chained = number().min(a).min(b).max(a + 50.0).max(b + 50.0);
        let direct = number().min(a.max(b)).max((a + 50.0).min(b + 50.0));
        prop_assert_eq!(outcome(&chained, Value::from(n)), outcome(&direct, Value::from(n)));
    }

    #[test]
    fn array_min_order_independent(a in 0usize..6, b in 0usize..6, len in 0usize..8) {
        let items = Value::array((0..len).map(|i| Value::from(i)));
        let chained = number().array().min(a).min(b);
        let direct = number().array().min(a.max(b));
        prop_assert_eq!(outcome(&chained, items.clone()), outcome(&direct, items));
    }
}

// ============================================================================
// IDEMPOTENCE: parsing a successful output again yields the same output
// ============================================================================

fn user() -> ObjectSchema {
    object([
        ("name", Schema::from(string().min(1))),
        ("age", number().int().nonnegative().optional()),
        ("tags", string().array().into()),
        ("role", enumeration(["admin", "user"]).default("user")),
    ])
}

proptest! {
    #[test]
    fn successful_output_reparses_unchanged(
        name in "[a-z]{0,8}",
        age in proptest::option::of(-5i32..120),
        tags in proptest::collection::vec("[a-z]{1,4}", 0..4),
        extra in any::<bool>(),
    ) {
        let mut fields = vec![
            ("name", Value::from(name.as_str())),
            ("tags", Value::array(tags.iter().map(|t| Value::from(t.as_str())))),
        ];
        if let Some(age) = age {
            fields.push(("age", Value::from(age)));
        }
        if extra {
            fields.push(("unknown", Value::from(1)));
        }
        let schema = user();
        if let Ok(ParseResult::Success(first)) = schema.safe_parse(Value::object(fields)) {
            let second = schema.safe_parse(first.clone());
            prop_assert_eq!(second, Ok(ParseResult::Success(first)));
        }
    }

    #[test]
    fn parsing_is_deterministic(s in ".{0,20}") {
        let schema = string().email().or(string().uuid()).or(number());
        prop_assert_eq!(
            outcome(&schema, Value::from(s.as_str())),
            outcome(&schema, Value::from(s.as_str()))
        );
    }
}
