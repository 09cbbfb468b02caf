//! Two-pass projector.
//!
//! The scan pass counts how often each node is reached and which nodes sit
//! on a cycle. The emit pass then inlines every node except the root,
//! registered ids, cycle targets and (with [`Reused::Ref`]) shared nodes,
//! which go to the definitions section.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value as Json, json};
use sieve_value::{Literal, Value};

use super::JsonSchemaError;
use super::options::{JsonSchemaOptions, Reused, Target, Unrepresentable};
use crate::combinators::object::UnknownKeys;
use crate::combinators::record::enumerable_keys;
use crate::foundation::{Bag, CatchValue, Def, Format, Io, Limit, MAX_SAFE_INTEGER, Schema, SchemaId};

type Fragment = Result<Map<String, Json>, JsonSchemaError>;

pub(super) struct Generator<'o, 'r> {
    options: &'o JsonSchemaOptions<'r>,
    /// Registered ids are referenced by name instead of `$defs` entries.
    external: bool,
    root: Option<SchemaId>,
    counts: HashMap<SchemaId, usize>,
    cyclic: HashSet<SchemaId>,
    names: HashMap<SchemaId, String>,
    defs: Map<String, Json>,
}

impl<'o, 'r> Generator<'o, 'r> {
    pub(super) fn new(options: &'o JsonSchemaOptions<'r>, external: bool) -> Self {
        Self {
            options,
            external,
            root: None,
            counts: HashMap::new(),
            cyclic: HashSet::new(),
            names: HashMap::new(),
            defs: Map::new(),
        }
    }

    /// Projects `schema` as a complete document.
    pub(super) fn document(mut self, schema: &Schema) -> Result<Json, JsonSchemaError> {
        let root = resolve(schema);
        self.root = root.as_ref().map(Schema::id);
        self.scan(schema, &mut Vec::new());

        let body = match &root {
            Some(root) => self.fragment(root)?,
            None => self.unrepresentable("lazy")?,
        };

        let target = self.options.target;
        let mut doc = Map::new();
        doc.insert("$schema".to_owned(), Json::from(target.uri()));
        doc.extend(body);
        if !self.defs.is_empty() {
            doc.insert(target.defs_key().to_owned(), Json::Object(self.defs));
        }
        Ok(Json::Object(doc))
    }

    // ==================== Scan ====================

    fn scan(&mut self, schema: &Schema, stack: &mut Vec<SchemaId>) {
        let Some(schema) = resolve(schema) else {
            return;
        };
        let id = schema.id();
        if stack.contains(&id) {
            self.cyclic.insert(id);
            return;
        }
        let count = self.counts.entry(id).or_insert(0);
        *count += 1;
        if *count > 1 {
            return;
        }
        stack.push(id);
        for child in self.children(&schema) {
            self.scan(&child, stack);
        }
        stack.pop();
    }

    fn children(&self, schema: &Schema) -> Vec<Schema> {
        match schema.def() {
            Def::Object(def) => {
                let mut out: Vec<Schema> = def.shape.values().cloned().collect();
                if let UnknownKeys::Catchall(rest) = &def.unknown {
                    out.push(rest.clone());
                }
                out
            }
            Def::Tuple { items, rest } => items.iter().chain(rest).cloned().collect(),
            Def::Union(def) => def.options.clone(),
            Def::DiscriminatedUnion(def) => def.options.clone(),
            Def::Record(def) => vec![def.key.clone(), def.value.clone()],
            Def::Map { key, value } => vec![key.clone(), value.clone()],
            Def::Intersection(left, right) => vec![left.clone(), right.clone()],
            Def::Array(inner)
            | Def::Set(inner)
            | Def::Optional(inner)
            | Def::Nullable(inner)
            | Def::Default { inner, .. }
            | Def::Prefault { inner, .. }
            | Def::Catch { inner, .. }
            | Def::Readonly(inner)
            | Def::NonOptional(inner)
            | Def::Brand(inner) => vec![inner.clone()],
            Def::Pipe { input, output } => vec![self.pipe_side(input, output).clone()],
            _ => Vec::new(),
        }
    }

    fn pipe_side<'s>(&self, input: &'s Schema, output: &'s Schema) -> &'s Schema {
        match self.options.io {
            Io::Input if matches!(input.def(), Def::Transform(_)) => output,
            Io::Input => input,
            Io::Output => output,
        }
    }

    // ==================== Emit ====================

    /// A reference to `schema` or its inline fragment.
    fn emit(&mut self, schema: &Schema) -> Result<Json, JsonSchemaError> {
        let Some(schema) = resolve(schema) else {
            return self.unrepresentable("lazy").map(Json::Object);
        };
        let id = schema.id();
        if self.root == Some(id) {
            return Ok(json!({ "$ref": "#" }));
        }

        let registered = self.options.registry.get(&schema).and_then(|meta| meta.id);
        if self.external {
            if let Some(name) = &registered {
                return Ok(json!({ "$ref": name }));
            }
        }
        let Some(name) = registered.or_else(|| self.auto_name(id)) else {
            return self.fragment(&schema).map(Json::Object);
        };

        let reference = json!({ "$ref": format!("#/{}/{name}", self.options.target.defs_key()) });
        if !self.defs.contains_key(&name) {
            tracing::debug!(name = %name, kind = schema.kind(), "extracting definition");
            self.defs.insert(name.clone(), Json::Null);
            let body = self.fragment(&schema)?;
            self.defs.insert(name, Json::Object(body));
        }
        Ok(reference)
    }

    fn auto_name(&mut self, id: SchemaId) -> Option<String> {
        let shared = self.options.reused == Reused::Ref && self.counts.get(&id) > Some(&1);
        if !shared && !self.cyclic.contains(&id) {
            return None;
        }
        let next = self.names.len();
        Some(
            self.names
                .entry(id)
                .or_insert_with(|| format!("__schema{next}"))
                .clone(),
        )
    }

    /// The canonical fragment of a resolved node: its kind's keywords, its
    /// registered metadata, then the override.
    fn fragment(&mut self, schema: &Schema) -> Fragment {
        let mut out = self.body(schema)?;
        if let Some(meta) = self.options.registry.get(schema) {
            let fields = meta.to_json_fields();
            if !fields.is_empty() {
                out = self.open(Json::Object(out));
                out.extend(fields);
            }
        }
        if let Some(hook) = &self.options.override_fn {
            hook(schema, &mut out);
        }
        Ok(out)
    }

    fn body(&mut self, schema: &Schema) -> Fragment {
        let node = schema.node();
        let io = self.options.io;
        let mut out = Map::new();
        match &node.def {
            Def::String { .. } => {
                out.insert("type".into(), "string".into());
                string_keywords(&node.bag, &mut out);
            }
            Def::Number { .. } => {
                let ty = if node.bag.int { "integer" } else { "number" };
                out.insert("type".into(), ty.into());
                number_keywords(&node.bag, &mut out);
            }
            Def::Boolean { .. } => {
                out.insert("type".into(), "boolean".into());
            }
            Def::Null => {
                out.insert("type".into(), "null".into());
            }
            Def::Any | Def::Unknown => {}
            Def::Never => {
                out.insert("not".into(), json!({}));
            }
            Def::Literal(values) | Def::Enum(values) => {
                let Some(json_values) = values.iter().map(literal_json).collect::<Option<Vec<_>>>()
                else {
                    return self.unrepresentable(node.def.name());
                };
                if let Some(ty) = common_type(&json_values) {
                    out.insert("type".into(), ty.into());
                }
                match <[Json; 1]>::try_from(json_values) {
                    Ok([single]) if matches!(node.def, Def::Literal(_)) => {
                        out.insert("const".into(), single);
                    }
                    Ok([single]) => {
                        out.insert("enum".into(), Json::Array(vec![single]));
                    }
                    Err(many) => {
                        out.insert("enum".into(), Json::Array(many));
                    }
                }
            }
            Def::Object(def) => {
                out.insert("type".into(), "object".into());
                let mut properties = Map::new();
                let mut required = Vec::new();
                for (key, field) in &def.shape {
                    properties.insert(key.clone(), self.emit(field)?);
                    let optional = match io {
                        Io::Input => field.optin(),
                        Io::Output => field.optout(),
                    };
                    if !optional {
                        required.push(Json::from(key.as_str()));
                    }
                }
                out.insert("properties".into(), Json::Object(properties));
                if !required.is_empty() {
                    out.insert("required".into(), Json::Array(required));
                }
                match &def.unknown {
                    UnknownKeys::Strict => {
                        out.insert("additionalProperties".into(), false.into());
                    }
                    UnknownKeys::Strip if io == Io::Output => {
                        out.insert("additionalProperties".into(), false.into());
                    }
                    UnknownKeys::Strip => {}
                    UnknownKeys::Passthrough => {
                        out.insert("additionalProperties".into(), json!({}));
                    }
                    UnknownKeys::Catchall(rest) => {
                        out.insert("additionalProperties".into(), self.emit(rest)?);
                    }
                }
            }
            Def::Array(element) => {
                out.insert("type".into(), "array".into());
                out.insert("items".into(), self.emit(element)?);
                let (min, max) = node.bag.size_bounds();
                if let Some(min) = min {
                    out.insert("minItems".into(), min.into());
                }
                if let Some(max) = max {
                    out.insert("maxItems".into(), max.into());
                }
            }
            Def::Tuple { items, rest } => {
                out.insert("type".into(), "array".into());
                let prefix = items
                    .iter()
                    .map(|item| self.emit(item))
                    .collect::<Result<Vec<_>, _>>()?;
                let rest = rest.as_ref().map(|r| self.emit(r)).transpose()?;
                let (prefix_key, rest_key) = match self.options.target {
                    Target::Draft2020 => ("prefixItems", "items"),
                    Target::Draft7 => ("items", "additionalItems"),
                };
                out.insert(prefix_key.into(), Json::Array(prefix));
                let has_rest = rest.is_some();
                if let Some(rest) = rest {
                    out.insert(rest_key.into(), rest);
                }
                let required = items
                    .iter()
                    .rposition(|item| match io {
                        Io::Input => !item.optin(),
                        Io::Output => !item.optout(),
                    })
                    .map_or(0, |i| i + 1);
                if required > 0 {
                    out.insert("minItems".into(), required.into());
                }
                if !has_rest {
                    out.insert("maxItems".into(), items.len().into());
                }
            }
            Def::Union(def) => {
                let options = self.emit_all(&def.options)?;
                out.insert("anyOf".into(), Json::Array(options));
            }
            Def::DiscriminatedUnion(def) => {
                let options = self.emit_all(&def.options)?;
                out.insert("anyOf".into(), Json::Array(options));
            }
            Def::Intersection(left, right) => {
                let both = vec![self.emit(left)?, self.emit(right)?];
                out.insert("allOf".into(), Json::Array(both));
            }
            Def::Record(def) => {
                out.insert("type".into(), "object".into());
                out.insert("propertyNames".into(), self.emit(&def.key)?);
                out.insert("additionalProperties".into(), self.emit(&def.value)?);
                if let Some(keys) = enumerable_keys(&def.key).filter(|_| !def.partial) {
                    let keys = keys.into_iter().map(Json::from).collect();
                    out.insert("required".into(), Json::Array(keys));
                }
            }
            Def::Optional(inner) | Def::NonOptional(inner) | Def::Brand(inner) => {
                let inner = self.emit(inner)?;
                out = self.open(inner);
            }
            Def::Nullable(inner) => {
                let inner = self.emit(inner)?;
                out.insert("anyOf".into(), json!([inner, { "type": "null" }]));
            }
            Def::Default { inner, fallback } => {
                let inner = self.emit(inner)?;
                out = self.open(inner);
                out.insert("default".into(), fallback.get().to_json());
            }
            Def::Prefault { inner, fallback } => {
                let inner = self.emit(inner)?;
                out = self.open(inner);
                if io == Io::Input {
                    out.insert("default".into(), fallback.get().to_json());
                }
            }
            Def::Catch { inner, fallback } => {
                let inner = self.emit(inner)?;
                out = self.open(inner);
                match fallback {
                    CatchValue::Value(value) => {
                        out.insert("default".into(), value.to_json());
                    }
                    CatchValue::Fn(_) if self.options.unrepresentable == Unrepresentable::Throw => {
                        return Err(JsonSchemaError::DynamicCatch);
                    }
                    CatchValue::Fn(_) => {}
                }
            }
            Def::Readonly(inner) => {
                let inner = self.emit(inner)?;
                out = self.open(inner);
                out.insert("readOnly".into(), true.into());
            }
            Def::Pipe { input, output } => {
                let side = self.pipe_side(input, output).clone();
                let emitted = self.emit(&side)?;
                out = self.open(emitted);
            }
            Def::Lazy(_) => return self.unrepresentable("lazy"),
            Def::BigInt { .. }
            | Def::Date { .. }
            | Def::Symbol
            | Def::Undefined
            | Def::Void
            | Def::NaN
            | Def::Map { .. }
            | Def::Set(_)
            | Def::Transform(_)
            | Def::Custom => return self.unrepresentable(node.def.name()),
        }
        Ok(out)
    }

    fn emit_all(&mut self, schemas: &[Schema]) -> Result<Vec<Json>, JsonSchemaError> {
        schemas.iter().map(|s| self.emit(s)).collect()
    }

    /// Turns an emitted child into a fragment that keywords can be added to.
    /// Draft-07 ignores siblings of `$ref`, so a reference is wrapped.
    fn open(&self, emitted: Json) -> Map<String, Json> {
        match emitted {
            Json::Object(map)
                if self.options.target == Target::Draft7 && map.contains_key("$ref") =>
            {
                let mut out = Map::new();
                out.insert("allOf".into(), Json::Array(vec![Json::Object(map)]));
                out
            }
            Json::Object(map) => map,
            other => {
                let mut out = Map::new();
                out.insert("allOf".into(), Json::Array(vec![other]));
                out
            }
        }
    }

    fn unrepresentable(&self, kind: &'static str) -> Fragment {
        match self.options.unrepresentable {
            Unrepresentable::Throw => Err(JsonSchemaError::Unrepresentable { kind }),
            Unrepresentable::Any => {
                tracing::trace!(kind, "unrepresentable kind emitted as {{}}");
                Ok(Map::new())
            }
        }
    }
}

/// Follows lazy nodes to the schema they stand for.
fn resolve(schema: &Schema) -> Option<Schema> {
    let mut current = schema.clone();
    while let Def::Lazy(lazy) = current.def() {
        current = lazy.resolve()?;
    }
    Some(current)
}

// ============================================================================
// KEYWORDS
// ============================================================================

fn num(n: f64) -> Json {
    Value::Number(n).to_json()
}

fn literal_json(literal: &Literal) -> Option<Json> {
    match literal {
        Literal::Null => Some(Json::Null),
        Literal::Bool(b) => Some(Json::from(*b)),
        Literal::Number(n) if n.is_finite() => Some(num(*n)),
        Literal::String(s) => Some(Json::from(s.as_str())),
        Literal::Undefined | Literal::BigInt(_) | Literal::Number(_) => None,
    }
}

fn common_type(values: &[Json]) -> Option<&'static str> {
    let type_of = |v: &Json| match v {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        _ => "string",
    };
    let first = type_of(values.first()?);
    values.iter().all(|v| type_of(v) == first).then_some(first)
}

fn string_keywords(bag: &Bag, out: &mut Map<String, Json>) {
    let (min, max) = bag.size_bounds();
    if let Some(min) = min {
        out.insert("minLength".into(), min.into());
    }
    if let Some(max) = max {
        out.insert("maxLength".into(), max.into());
    }
    if let Some(format) = bag.formats.iter().rev().find_map(|f| f.json_schema_format()) {
        out.insert("format".into(), format.into());
    }
    if bag.formats.contains(&Format::Base64) {
        out.insert("contentEncoding".into(), "base64".into());
    } else if bag.formats.contains(&Format::Base64url) {
        out.insert("contentEncoding".into(), "base64url".into());
    }
    match bag.patterns.as_slice() {
        [] => {}
        [single] => {
            out.insert("pattern".into(), single.as_str().into());
        }
        many => {
            let all = many.iter().map(|p| json!({ "pattern": p })).collect();
            out.insert("allOf".into(), Json::Array(all));
        }
    }
}

fn number_keywords(bag: &Bag, out: &mut Map<String, Json>) {
    let bound = |slot: &Option<(Limit, bool)>| match slot {
        Some((Limit::Number(n), inclusive)) => Some((*n, *inclusive)),
        _ => None,
    };
    match bound(&bag.minimum) {
        Some((n, true)) => {
            out.insert("minimum".into(), num(n));
        }
        Some((n, false)) => {
            out.insert("exclusiveMinimum".into(), num(n));
        }
        None if bag.int => {
            out.insert("minimum".into(), num(-MAX_SAFE_INTEGER));
        }
        None => {}
    }
    match bound(&bag.maximum) {
        Some((n, true)) => {
            out.insert("maximum".into(), num(n));
        }
        Some((n, false)) => {
            out.insert("exclusiveMaximum".into(), num(n));
        }
        None if bag.int => {
            out.insert("maximum".into(), num(MAX_SAFE_INTEGER));
        }
        None => {}
    }
    if let Some(Limit::Number(d)) = &bag.multiple_of {
        out.insert("multipleOf".into(), num(*d));
    }
}
