//! Container values: arrays, objects, maps and sets.
//!
//! Every container carries a `frozen` flag. Equality ignores the flag; a
//! frozen container compares equal to an unfrozen one with the same
//! contents.

use indexmap::IndexMap;

use crate::error::{ValueError, ValueResult};
use crate::kind::ValueKind;
use crate::value::Value;

// ============================================================================
// ARRAY
// ============================================================================

/// An ordered sequence of values. Holes are stored as `Value::Undefined`.
#[derive(Debug, Clone, Default)]
pub struct Array {
    items: Vec<Value>,
    frozen: bool,
}

impl Array {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an array with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            frozen: false,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// Appends an element.
    pub fn push(&mut self, value: Value) -> ValueResult<()> {
        self.ensure_mutable()?;
        self.items.push(value);
        Ok(())
    }

    /// Replaces the element at `index`.
    pub fn set(&mut self, index: usize, value: Value) -> ValueResult<Value> {
        self.ensure_mutable()?;
        let length = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(ValueError::IndexOutOfBounds { index, length })?;
        Ok(std::mem::replace(slot, value))
    }

    /// Marks the array as frozen.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Returns true if the array is frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Consumes the array and returns its elements.
    #[must_use]
    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }

    fn ensure_mutable(&self) -> ValueResult<()> {
        if self.frozen {
            Err(ValueError::Frozen {
                kind: ValueKind::Array,
            })
        } else {
            Ok(())
        }
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        Self {
            items,
            frozen: false,
        }
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// OBJECT
// ============================================================================

/// A plain key-indexed structure with insertion-ordered string keys.
#[derive(Debug, Clone, Default)]
pub struct Object {
    entries: IndexMap<String, Value>,
    frozen: bool,
}

impl Object {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an object with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            frozen: false,
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the object has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns true if `key` is present (even when its value is undefined).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Inserts an entry, returning the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> ValueResult<Option<Value>> {
        self.ensure_mutable()?;
        Ok(self.entries.insert(key.into(), value))
    }

    /// Removes an entry, preserving the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> ValueResult<Option<Value>> {
        self.ensure_mutable()?;
        Ok(self.entries.shift_remove(key))
    }

    /// Marks the object as frozen.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Returns true if the object is frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn ensure_mutable(&self) -> ValueResult<()> {
        if self.frozen {
            Err(ValueError::Frozen {
                kind: ValueKind::Object,
            })
        } else {
            Ok(())
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.entries.get(k).is_some_and(|o| o == v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            frozen: false,
        }
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// MAP
// ============================================================================

/// An insertion-ordered map with arbitrary value keys.
///
/// Keys are compared with SameValueZero semantics, so lookups are linear.
#[derive(Debug, Clone, Default)]
pub struct Map {
    entries: Vec<(Value, Value)>,
    frozen: bool,
}

impl Map {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.same_value_zero(key))
            .map(|(_, v)| v)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Inserts an entry. An existing key keeps its position and gets the
    /// new value.
    pub fn insert(&mut self, key: Value, value: Value) -> ValueResult<Option<Value>> {
        self.ensure_mutable()?;
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| k.same_value_zero(&key)) {
            return Ok(Some(std::mem::replace(slot, value)));
        }
        self.entries.push((key, value));
        Ok(None)
    }

    /// Marks the map as frozen.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Returns true if the map is frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn ensure_mutable(&self) -> ValueResult<()> {
        if self.frozen {
            Err(ValueError::Frozen {
                kind: ValueKind::Map,
            })
        } else {
            Ok(())
        }
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl FromIterator<(Value, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            if let Some((_, slot)) = map.entries.iter_mut().find(|(e, _)| e.same_value_zero(&k)) {
                *slot = v;
            } else {
                map.entries.push((k, v));
            }
        }
        map
    }
}

impl IntoIterator for Map {
    type Item = (Value, Value);
    type IntoIter = std::vec::IntoIter<(Value, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ============================================================================
// SET
// ============================================================================

/// An insertion-ordered collection of unique values (SameValueZero).
#[derive(Debug, Clone, Default)]
pub struct Set {
    items: Vec<Value>,
    frozen: bool,
}

impl Set {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if `value` is an element.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.items.iter().any(|v| v.same_value_zero(value))
    }

    /// Iterates over the elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Adds an element, returning false if it was already present.
    pub fn insert(&mut self, value: Value) -> ValueResult<bool> {
        self.ensure_mutable()?;
        if self.contains(&value) {
            return Ok(false);
        }
        self.items.push(value);
        Ok(true)
    }

    /// Marks the set as frozen.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Returns true if the set is frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn ensure_mutable(&self) -> ValueResult<()> {
        if self.frozen {
            Err(ValueError::Frozen {
                kind: ValueKind::Set,
            })
        } else {
            Ok(())
        }
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len() && self.items.iter().all(|v| other.contains(v))
    }
}

impl FromIterator<Value> for Set {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            if !set.contains(&value) {
                set.items.push(value);
            }
        }
        set
    }
}

impl IntoIterator for Set {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
