//! The path-addressed document.

use crate::error::{Error, Result};
use crate::path::Path;
use crate::value::{Map, Value};
use chrono::{DateTime, Utc};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// A string-keyed tree of [`Value`]s addressed by dotted paths.
///
/// The root is always a mapping. Intermediate mappings are created on demand
/// by [`Document::set`]:
///
/// ```rust
/// use docpath::Document;
///
/// let mut doc = Document::new();
/// doc.set("database.url", "postgres://localhost/app").unwrap();
/// assert_eq!(doc.get_str("database.url").unwrap(), "postgres://localhost/app");
/// assert!(doc.get_int("database.port").unwrap_err().is_not_found());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::from_map(Map::new())
    }

    /// Wrap an existing mapping.
    pub fn from_map(map: Map) -> Self {
        Self {
            root: Value::Map(map),
        }
    }

    pub fn root(&self) -> &Map {
        match &self.root {
            Value::Map(map) => map,
            _ => unreachable!("document root is always a mapping"),
        }
    }

    pub fn root_mut(&mut self) -> &mut Map {
        self.root.make_map()
    }

    /// Replace the whole tree, returning the previous root.
    pub fn set_root(&mut self, map: Map) -> Map {
        std::mem::replace(self.root_mut(), map)
    }

    pub fn into_map(self) -> Map {
        match self.root {
            Value::Map(map) => map,
            _ => Map::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.root().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root().is_empty()
    }

    /// Raw value at `path`.
    ///
    /// Walking stops with `None` as soon as a non-final segment resolves to
    /// something other than a mapping. The empty path yields the root.
    pub fn get(&self, path: impl Into<Path>) -> Option<&Value> {
        let path = path.into();
        let mut node = &self.root;
        for segment in path.segments() {
            node = node.as_map()?.get(segment)?;
        }
        Some(node)
    }

    /// Mutable value at `path`. The root itself is not reachable here so it can
    /// never stop being a mapping; use [`Document::root_mut`] instead.
    pub fn get_mut(&mut self, path: impl Into<Path>) -> Option<&mut Value> {
        let path = path.into();
        if path.is_empty() {
            return None;
        }
        let mut node = &mut self.root;
        for segment in path.segments() {
            node = node.as_map_mut()?.get_mut(segment)?;
        }
        Some(node)
    }

    pub fn contains(&self, path: impl Into<Path>) -> bool {
        self.get(path).is_some()
    }

    /// Store `value` at `path`, replacing whatever was there.
    ///
    /// Missing intermediate keys are created as empty mappings. Intermediate
    /// values that are not mappings are overwritten by empty mappings, losing
    /// their contents; check with [`Document::get`] first if that matters.
    pub fn set(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<()> {
        let path = path.into();
        let (last, parents) = path.split_last().ok_or(Error::EmptyPath)?;

        let mut current = self.root_mut();
        for segment in parents {
            let slot = current
                .entry(segment.clone())
                .or_insert_with(|| Value::Map(Map::new()));
            if !matches!(slot, Value::Map(_)) {
                tracing::debug!(
                    %path,
                    %segment,
                    replaced = slot.type_name(),
                    "overwriting intermediate value with a mapping"
                );
            }
            current = slot.make_map();
        }

        tracing::trace!(%path, "set");
        current.insert(last.clone(), value.into());
        Ok(())
    }

    /// Remove the value at `path`.
    ///
    /// Removing a key that is absent from an existing mapping is a no-op. A
    /// missing parent is `NotFound`; a parent that is not a mapping is a
    /// `TypeMismatch`.
    pub fn delete(&mut self, path: impl Into<Path>) -> Result<()> {
        let path = path.into();
        let (last, parents) = path.split_last().ok_or(Error::EmptyPath)?;

        let mut node = &mut self.root;
        for segment in parents {
            node = node
                .as_map_mut()
                .and_then(|map| map.get_mut(segment))
                .ok_or_else(|| Error::not_found(parents))?;
        }

        match node {
            Value::Map(map) => {
                if map.remove(last).is_some() {
                    tracing::trace!(%path, "deleted");
                }
                Ok(())
            }
            Value::Null => Err(Error::not_found(parents)),
            other => Err(Error::type_mismatch(parents, "map", other)),
        }
    }

    /// Like [`Document::get`] but absent and null values are `NotFound`.
    pub(crate) fn require(&self, path: &Path) -> Result<&Value> {
        match self.get(path) {
            None | Some(Value::Null) => Err(Error::not_found(path)),
            Some(value) => Ok(value),
        }
    }

    pub fn get_str(&self, path: impl Into<Path>) -> Result<&str> {
        let path = path.into();
        match self.require(&path)? {
            Value::String(s) => Ok(s.as_str()),
            other => Err(Error::type_mismatch(path, "string", other)),
        }
    }

    pub fn get_bool(&self, path: impl Into<Path>) -> Result<bool> {
        let path = path.into();
        match self.require(&path)? {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::type_mismatch(path, "bool", other)),
        }
    }

    pub fn get_int(&self, path: impl Into<Path>) -> Result<i64> {
        let path = path.into();
        match self.require(&path)? {
            Value::Int(i) => Ok(*i),
            other => Err(Error::type_mismatch(path, "int", other)),
        }
    }

    /// Float at `path`; integers are widened.
    pub fn get_float(&self, path: impl Into<Path>) -> Result<f64> {
        let path = path.into();
        match self.require(&path)? {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            other => Err(Error::type_mismatch(path, "float", other)),
        }
    }

    pub fn get_timestamp(&self, path: impl Into<Path>) -> Result<DateTime<Utc>> {
        let path = path.into();
        match self.require(&path)? {
            Value::Timestamp(ts) => Ok(*ts),
            other => Err(Error::type_mismatch(path, "timestamp", other)),
        }
    }

    pub fn get_map(&self, path: impl Into<Path>) -> Result<&Map> {
        let path = path.into();
        match self.require(&path)? {
            Value::Map(map) => Ok(map),
            other => Err(Error::type_mismatch(path, "map", other)),
        }
    }

    /// Copy of the mapping at `path` as a standalone document.
    pub fn get_document(&self, path: impl Into<Path>) -> Result<Document> {
        self.get_map(path).map(|map| Document::from_map(map.clone()))
    }
}

impl From<Map> for Document {
    fn from(map: Map) -> Self {
        Document::from_map(map)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.root
    }
}

impl From<Document> for Map {
    fn from(doc: Document) -> Self {
        doc.into_map()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Map(map) => Ok(Document::from_map(map)),
            Value::Null => Ok(Document::new()),
            other => Err(de::Error::custom(format!(
                "document root must be a mapping, found {}",
                other.type_name()
            ))),
        }
    }
}

/// Indented JSON rendering of the whole tree.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string_pretty(self.root()).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
