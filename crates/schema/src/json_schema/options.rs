use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value as Json};

use crate::foundation::{Io, Schema};
use crate::registry::{self, Registry};

/// The JSON Schema dialect to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Target {
    #[default]
    Draft2020,
    /// Uses `definitions` and array-form tuples.
    Draft7,
}

impl Target {
    pub(crate) fn uri(self) -> &'static str {
        match self {
            Self::Draft2020 => "https://json-schema.org/draft/2020-12/schema",
            Self::Draft7 => "http://json-schema.org/draft-07/schema#",
        }
    }

    pub(crate) fn defs_key(self) -> &'static str {
        match self {
            Self::Draft2020 => "$defs",
            Self::Draft7 => "definitions",
        }
    }
}

/// What to do with kinds JSON Schema cannot express.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Unrepresentable {
    #[default]
    Throw,
    /// Emit `{}` (accept anything) instead.
    Any,
}

/// How nodes referenced from several places are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reused {
    #[default]
    Inline,
    /// Extract them into the definitions section.
    Ref,
}

/// Post-processes each generated fragment. Never called on `$ref`
/// placeholders.
pub type OverrideFn = Arc<dyn Fn(&Schema, &mut Map<String, Json>) + Send + Sync>;

/// Projector options.
#[derive(Clone)]
pub struct JsonSchemaOptions<'r> {
    pub(crate) target: Target,
    pub(crate) io: Io,
    pub(crate) unrepresentable: Unrepresentable,
    pub(crate) reused: Reused,
    pub(crate) registry: &'r Registry,
    pub(crate) override_fn: Option<OverrideFn>,
}

impl Default for JsonSchemaOptions<'static> {
    fn default() -> Self {
        Self {
            target: Target::default(),
            io: Io::Output,
            unrepresentable: Unrepresentable::default(),
            reused: Reused::default(),
            registry: registry::global(),
            override_fn: None,
        }
    }
}

impl JsonSchemaOptions<'static> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'r> JsonSchemaOptions<'r> {
    #[must_use = "builder methods must be chained or built"]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Projects pipes, defaults and prefaults from the given side.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_io(mut self, io: Io) -> Self {
        self.io = io;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_unrepresentable(mut self, unrepresentable: Unrepresentable) -> Self {
        self.unrepresentable = unrepresentable;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_reused(mut self, reused: Reused) -> Self {
        self.reused = reused;
        self
    }

    /// Reads metadata from `registry` instead of the global registry.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_registry<'a>(self, registry: &'a Registry) -> JsonSchemaOptions<'a> {
        JsonSchemaOptions {
            target: self.target,
            io: self.io,
            unrepresentable: self.unrepresentable,
            reused: self.reused,
            registry,
            override_fn: self.override_fn,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_override<F>(mut self, f: F) -> Self
    where
        F: Fn(&Schema, &mut Map<String, Json>) + Send + Sync + 'static,
    {
        self.override_fn = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for JsonSchemaOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaOptions")
            .field("target", &self.target)
            .field("io", &self.io)
            .field("unrepresentable", &self.unrepresentable)
            .field("reused", &self.reused)
            .field("override", &self.override_fn.as_ref().map(|_| "<fn>"))
            .finish_non_exhaustive()
    }
}
