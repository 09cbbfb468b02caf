//! Deferred and recursive schemas
//!
//! [`lazy`] resolves its getter once, on first use. [`recursive`] builds a
//! schema that refers to itself through a weak link, so the cycle does not
//! keep the node alive.

use std::sync::{Arc, OnceLock, Weak};

use crate::foundation::{Def, Schema};
use crate::foundation::schema::Node;

#[derive(Clone)]
pub(crate) enum LazyDef {
    Getter {
        getter: Arc<dyn Fn() -> Schema + Send + Sync>,
        cell: Arc<OnceLock<Schema>>,
    },
    SelfRef(Weak<Node>),
}

impl LazyDef {
    /// The schema this node stands for. `None` once a self reference has
    /// outlived its schema.
    pub(crate) fn resolve(&self) -> Option<Schema> {
        match self {
            Self::Getter { getter, cell } => Some(cell.get_or_init(|| getter()).clone()),
            Self::SelfRef(node) => node.upgrade().map(Schema),
        }
    }
}

/// Defers building a schema until it is first used.
///
/// ```rust,ignore
/// let tree = lazy(|| object([("children", tree_ref().array())]));
/// ```
pub fn lazy<F, S>(getter: F) -> Schema
where
    F: Fn() -> S + Send + Sync + 'static,
    S: Into<Schema>,
{
    Schema::from_def(Def::Lazy(LazyDef::Getter {
        getter: Arc::new(move || getter().into()),
        cell: Arc::new(OnceLock::new()),
    }))
}

/// Builds a self-referential schema. `build` receives a handle to the
/// schema being built and may embed it anywhere.
///
/// ```rust,ignore
/// let category = recursive(|this| {
///     object([("name", string().into()), ("subcategories", this.array().into())]).into()
/// });
/// ```
pub fn recursive<F, S>(build: F) -> Schema
where
    F: FnOnce(Schema) -> S,
    S: Into<Schema>,
{
    Schema(Arc::new_cyclic(|this: &Weak<Node>| {
        let handle = Schema::from_def(Def::Lazy(LazyDef::SelfRef(this.clone())));
        let built: Schema = build(handle).into();
        built.node().clone()
    }))
}
