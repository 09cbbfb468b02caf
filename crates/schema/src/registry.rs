//! Schema metadata registries
//!
//! A [`Registry`] maps schema identity to a [`Meta`] record. It never
//! affects validation. The global registry backs `describe`/`meta` and is
//! what the JSON Schema projector consults by default.
//!
//! Entries hold their schema alive, so identities stay unique until the
//! entry is removed.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;

use crate::foundation::{Schema, SchemaId, SchemaType};

// ============================================================================
// META
// ============================================================================

/// Metadata attached to a schema.
///
/// `extra` fields are emitted verbatim into JSON Schema fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meta {
    /// Extracts the schema into `$defs` under this name when projected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Meta {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn example(mut self, example: impl Into<serde_json::Value>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Adds an arbitrary field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// True if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.examples.is_empty()
            && self.extra.is_empty()
    }

    /// `self` layered over `base`: fields set here win.
    fn over(self, base: Self) -> Self {
        let mut extra = base.extra;
        extra.extend(self.extra);
        Self {
            id: self.id.or(base.id),
            title: self.title.or(base.title),
            description: self.description.or(base.description),
            examples: if self.examples.is_empty() {
                base.examples
            } else {
                self.examples
            },
            extra,
        }
    }

    /// Renders the metadata as JSON object fields, without `id`.
    pub(crate) fn to_json_fields(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut fields = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        fields.remove("id");
        fields
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

struct Entry {
    schema: Schema,
    meta: Meta,
}

#[derive(Default)]
struct Inner {
    entries: IndexMap<SchemaId, Entry>,
    ids: HashMap<String, SchemaId>,
}

/// An identity-keyed metadata store. Cheap to share behind a reference;
/// every method takes `&self`.
#[derive(Default)]
pub struct Registry {
    inner: RwLock<Inner>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `meta` to `schema`, replacing any previous entry. An `id`
    /// already held by another schema moves to this one.
    pub fn add<S: SchemaType>(&self, schema: &S, meta: Meta) -> &Self {
        let schema = schema.to_schema();
        let key = schema.id();
        let mut inner = self.inner.write();
        if let Some(old) = inner.entries.get(&key).and_then(|e| e.meta.id.clone()) {
            inner.ids.remove(&old);
        }
        if let Some(id) = &meta.id {
            if let Some(previous) = inner.ids.insert(id.clone(), key) {
                if previous != key {
                    if let Some(entry) = inner.entries.get_mut(&previous) {
                        entry.meta.id = None;
                    }
                    tracing::debug!(id = %id, "registry id reassigned");
                }
            }
        }
        tracing::trace!(kind = schema.kind(), id = ?meta.id, "registry entry added");
        inner.entries.insert(key, Entry { schema, meta });
        self
    }

    /// Returns the metadata of `schema`, layered over the metadata of the
    /// schema it was described from. The parent's `id` is not inherited.
    pub fn get<S: SchemaType>(&self, schema: &S) -> Option<Meta> {
        let schema = schema.as_schema();
        let own = self.inner.read().entries.get(&schema.id()).map(|e| e.meta.clone());
        let inherited = schema.node().parent.as_ref().and_then(|parent| {
            self.get(parent).map(|mut meta| {
                meta.id = None;
                meta
            })
        });
        let merged = match (own, inherited) {
            (Some(own), Some(base)) => own.over(base),
            (Some(meta), None) | (None, Some(meta)) => meta,
            (None, None) => return None,
        };
        (!merged.is_empty()).then_some(merged)
    }

    /// Removes the entry of `schema`, returning its metadata.
    pub fn remove<S: SchemaType>(&self, schema: &S) -> Option<Meta> {
        let mut inner = self.inner.write();
        let entry = inner.entries.shift_remove(&schema.as_schema().id())?;
        if let Some(id) = &entry.meta.id {
            inner.ids.remove(id);
        }
        tracing::trace!(kind = entry.schema.kind(), "registry entry removed");
        Some(entry.meta)
    }

    /// True if `schema` itself has an entry.
    pub fn has<S: SchemaType>(&self, schema: &S) -> bool {
        self.inner.read().entries.contains_key(&schema.as_schema().id())
    }

    /// Looks up a schema by its metadata `id`.
    #[must_use]
    pub fn schema_by_id(&self, id: &str) -> Option<Schema> {
        let inner = self.inner.read();
        let key = inner.ids.get(id)?;
        inner.entries.get(key).map(|e| e.schema.clone())
    }

    /// Returns every entry in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Schema, Meta)> {
        self.inner
            .read()
            .entries
            .values()
            .map(|e| (e.schema.clone(), e.meta.clone()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.entries.clear();
        inner.ids.clear();
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Registry")
            .field("count", &inner.entries.len())
            .field("ids", &inner.ids.keys().collect::<Vec<_>>())
            .finish()
    }
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// The process-wide registry used by `describe` and `meta`.
#[must_use]
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Empties the global registry.
pub fn reset_global() {
    tracing::debug!(entries = GLOBAL.len(), "global registry reset");
    GLOBAL.clear();
}
