//! Result formatters
//!
//! Turn the flat issue list of a [`ValidationError`] into shapes that are
//! easier to render:
//!
//! - [`flatten`]: form-level messages plus messages keyed by first path
//!   segment. Deeper structure is folded into the first segment.
//! - [`treeify`]: a tree mirroring the input's shape, to any depth.
//! - [`prettify`]: one `✖ message` line per issue, each followed by its
//!   `→ at path` locator.

use indexmap::IndexMap;
use serde::Serialize;
use sieve_value::PathSegment;

use crate::foundation::{Issue, IssueKind, ValidationError};

/// Renders a path in dotted notation, e.g. `users[0].name`.
#[must_use]
pub fn to_dot_path(path: &[PathSegment]) -> String {
    sieve_value::format_path(path)
}

fn segment_key(segment: &PathSegment) -> String {
    segment.to_string()
}

// ============================================================================
// FLATTEN
// ============================================================================

/// Messages split into top-level and first-segment buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedError {
    pub form_errors: Vec<String>,
    pub field_errors: IndexMap<String, Vec<String>>,
}

/// Flattens `error` using each issue's message.
#[must_use]
pub fn flatten(error: &ValidationError) -> FlattenedError {
    flatten_with(error, |issue| issue.message.clone())
}

/// Flattens `error`, rendering each issue with `map`.
pub fn flatten_with<F>(error: &ValidationError, map: F) -> FlattenedError
where
    F: Fn(&Issue) -> String,
{
    let mut out = FlattenedError::default();
    for issue in error.issues() {
        match issue.path.first() {
            Some(first) => out
                .field_errors
                .entry(segment_key(first))
                .or_default()
                .push(map(issue)),
            None => out.form_errors.push(map(issue)),
        }
    }
    out
}

// ============================================================================
// TREEIFY
// ============================================================================

/// Indices further than this past the last item are stored as properties
/// instead of padding `items` with holes.
const MAX_ITEM_GAP: usize = 1024;

/// Messages arranged in the shape of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorTree {
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, ErrorTree>>,
    /// Indexed children; indices without issues are `None`. An index far
    /// past the end is recorded under `properties` instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Option<ErrorTree>>>,
}

impl ErrorTree {
    /// Returns the subtree at `key`, if any issue was recorded below it.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&ErrorTree> {
        self.properties.as_ref()?.get(key)
    }

    /// Returns the subtree at `index`, if any issue was recorded below it.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&ErrorTree> {
        self.items.as_ref()?.get(index)?.as_ref()
    }

    fn child(&mut self, segment: &PathSegment) -> &mut ErrorTree {
        if let PathSegment::Index(i) = *segment {
            let len = self.items.as_ref().map_or(0, Vec::len);
            if i < len.saturating_add(MAX_ITEM_GAP) {
                let items = self.items.get_or_insert_with(Vec::new);
                if items.len() <= i {
                    items.resize(i + 1, None);
                }
                return items[i].get_or_insert_with(ErrorTree::default);
            }
        }
        self.properties
            .get_or_insert_with(IndexMap::new)
            .entry(segment_key(segment))
            .or_default()
    }
}

/// Builds the error tree of `error` using each issue's message.
#[must_use]
pub fn treeify(error: &ValidationError) -> ErrorTree {
    treeify_with(error, |issue| issue.message.clone())
}

/// Builds the error tree of `error`, rendering each issue with `map`.
///
/// Union, key and element issues are expanded into the issues they wrap.
pub fn treeify_with<F>(error: &ValidationError, map: F) -> ErrorTree
where
    F: Fn(&Issue) -> String,
{
    let mut root = ErrorTree::default();
    place(&mut root, error.issues(), &[], &map);
    root
}

fn place<F>(root: &mut ErrorTree, issues: &[Issue], base: &[PathSegment], map: &F)
where
    F: Fn(&Issue) -> String,
{
    for issue in issues {
        let mut path = base.to_vec();
        path.extend_from_slice(&issue.path);
        match &issue.kind {
            IssueKind::InvalidUnion { errors, .. } if !errors.is_empty() => {
                for member in errors {
                    place(root, member, &path, map);
                }
            }
            IssueKind::InvalidKey { issues, .. } | IssueKind::InvalidElement { issues, .. } => {
                place(root, issues, &path, map);
            }
            _ => {
                let mut node = &mut *root;
                for segment in &path {
                    node = node.child(segment);
                }
                node.errors.push(map(issue));
            }
        }
    }
}

// ============================================================================
// PRETTIFY
// ============================================================================

/// Renders every issue for humans, shallowest paths first.
///
/// ```text
/// ✖ Invalid input: expected string, received number
///   → at name
/// ```
#[must_use]
pub fn prettify(error: &ValidationError) -> String {
    let mut issues: Vec<&Issue> = error.issues().iter().collect();
    issues.sort_by_key(|issue| issue.path.len());
    let mut lines = Vec::with_capacity(issues.len() * 2);
    for issue in issues {
        lines.push(format!("✖ {}", issue.message));
        if !issue.path.is_empty() {
            lines.push(format!("  → at {}", to_dot_path(&issue.path)));
        }
    }
    lines.join("\n")
}

impl ValidationError {
    /// See [`flatten`].
    #[must_use]
    pub fn flatten(&self) -> FlattenedError {
        flatten(self)
    }

    /// See [`treeify`].
    #[must_use]
    pub fn treeify(&self) -> ErrorTree {
        treeify(self)
    }

    /// See [`prettify`].
    #[must_use]
    pub fn prettify(&self) -> String {
        prettify(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::object;
    use crate::foundation::{Schema, SchemaType};
    use crate::validators::{number, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sieve_value::Value;

    fn failure() -> ValidationError {
        let schema = object([
            ("name", Schema::from(string())),
            ("tags", Schema::from(string().array())),
            ("age", Schema::from(number())),
        ]);
        let input = Value::object([
            ("name", Value::from(1)),
            ("tags", Value::array([Value::from("a"), Value::from(2)])),
            ("age", Value::from(3)),
        ]);
        match schema.parse(input) {
            Err(crate::foundation::ParseError::Invalid(err)) => err,
            other => panic!("expected a validation failure, got {other:?}"),
        }
    }

    #[test]
    fn flatten_buckets_by_first_segment() {
        let flat = failure().flatten();
        assert_eq!(
            serde_json::to_value(&flat).unwrap(),
            json!({
                "formErrors": [],
                "fieldErrors": {
                    "name": ["Invalid input: expected string, received number"],
                    "tags": ["Invalid input: expected string, received number"],
                }
            })
        );
    }

    #[test]
    fn treeify_mirrors_shape() {
        let tree = failure().treeify();
        assert_eq!(
            tree.property("tags").and_then(|t| t.item(1)).map(|t| t.errors.clone()),
            Some(vec!["Invalid input: expected string, received number".to_owned()])
        );
        assert!(tree.property("tags").and_then(|t| t.item(0)).is_none());
        insta::assert_json_snapshot!(tree, @r###"
        {
          "errors": [],
          "properties": {
            "name": {
              "errors": [
                "Invalid input: expected string, received number"
              ]
            },
            "tags": {
              "errors": [],
              "items": [
                null,
                {
                  "errors": [
                    "Invalid input: expected string, received number"
                  ]
                }
              ]
            }
          }
        }
        "###);
    }

    #[test]
    fn prettify_sorts_by_depth() {
        let err = ValidationError::new(vec![]);
        assert_eq!(err.prettify(), "");
        assert_eq!(
            failure().prettify(),
            "✖ Invalid input: expected string, received number\n  → at name\n\
             ✖ Invalid input: expected string, received number\n  → at tags[1]"
        );
    }

    #[test]
    fn distant_indices_do_not_pad_items() {
        let issue = |path| Issue {
            kind: IssueKind::custom(),
            path,
            message: "bad".into(),
            input: None,
            continuable: true,
        };
        let err = ValidationError::new(vec![
            issue(vec![PathSegment::Index(1)]),
            issue(vec![PathSegment::Index(usize::MAX)]),
        ]);
        let tree = err.treeify();
        assert_eq!(tree.items.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            tree.property(&usize::MAX.to_string()).map(|t| t.errors.clone()),
            Some(vec!["bad".to_owned()])
        );
    }

    #[test]
    fn huge_map_keys_treeify_as_properties() {
        let schema = crate::combinators::map(number(), number());
        let input = Value::map([(Value::from(1e15), Value::from("x"))]);
        let err = match schema.parse(input) {
            Err(crate::foundation::ParseError::Invalid(err)) => err,
            other => panic!("expected a validation failure, got {other:?}"),
        };
        assert_eq!(
            err.issues()[0].path,
            vec![PathSegment::Key("1000000000000000".into())]
        );
        let tree = err.treeify();
        assert!(tree.items.is_none());
        assert!(tree.property("1000000000000000").is_some());
    }

    #[test]
    fn flatten_with_custom_mapper() {
        let flat = flatten_with(&failure(), |issue| issue.code().to_owned());
        assert_eq!(flat.field_errors["name"], vec!["invalid_type".to_owned()]);
    }
}
