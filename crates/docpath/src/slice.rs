//! Sequence accessors and read-modify-write appenders.
//!
//! `get_slice` only accepts the generic [`Value::List`]; the typed getters
//! coerce. Appending stores the getter's representation back, so appending an
//! int to a generic list of ints turns it into a [`Value::IntList`].

use crate::document::Document;
use crate::error::{Error, Result};
use crate::path::Path;
use crate::value::{Map, Value};

/// Treat a missing sequence as an empty one; every other error propagates.
fn or_empty<T>(fetched: Result<Vec<T>>) -> Result<Vec<T>> {
    match fetched {
        Err(err) if err.is_not_found() => Ok(Vec::new()),
        other => other,
    }
}

/// Log when an appender is about to replace a generic list with its typed form.
fn note_conversion(doc: &Document, path: &Path, into: &'static str) {
    if let Some(Value::List(_)) = doc.get(path) {
        tracing::trace!(%path, into, "converting generic list");
    }
}

/// Collect every element of a generic list through `pick`, failing on the
/// first element it rejects.
fn collect_homogeneous<T>(
    path: &Path,
    items: &[Value],
    expected: &'static str,
    pick: impl Fn(&Value) -> Option<T>,
) -> Result<Vec<T>> {
    items
        .iter()
        .map(|item| pick(item).ok_or_else(|| Error::type_mismatch(path, expected, item)))
        .collect()
}

impl Document {
    /// The generic sequence at `path`. Typed lists are a type mismatch.
    pub fn get_slice(&self, path: impl Into<Path>) -> Result<&[Value]> {
        let path = path.into();
        match self.require(&path)? {
            Value::List(items) => Ok(items.as_slice()),
            other => Err(Error::type_mismatch(path, "list", other)),
        }
    }

    /// Integers at `path`, from an int list or a generic list of ints.
    pub fn get_int_slice(&self, path: impl Into<Path>) -> Result<Vec<i64>> {
        let path = path.into();
        match self.require(&path)? {
            Value::IntList(items) => Ok(items.clone()),
            Value::List(items) => collect_homogeneous(&path, items, "int", |item| match item {
                Value::Int(i) => Some(*i),
                _ => None,
            }),
            other => Err(Error::type_mismatch(path, "int list", other)),
        }
    }

    /// Floats at `path`. Unlike [`Document::get_float`], ints inside a list
    /// are not widened.
    pub fn get_float_slice(&self, path: impl Into<Path>) -> Result<Vec<f64>> {
        let path = path.into();
        match self.require(&path)? {
            Value::FloatList(items) => Ok(items.clone()),
            Value::List(items) => collect_homogeneous(&path, items, "float", |item| match item {
                Value::Float(f) => Some(*f),
                _ => None,
            }),
            other => Err(Error::type_mismatch(path, "float list", other)),
        }
    }

    pub fn get_string_slice(&self, path: impl Into<Path>) -> Result<Vec<String>> {
        let path = path.into();
        match self.require(&path)? {
            Value::StringList(items) => Ok(items.clone()),
            Value::List(items) => collect_homogeneous(&path, items, "string", |item| {
                item.as_str().map(str::to_string)
            }),
            other => Err(Error::type_mismatch(path, "string list", other)),
        }
    }

    /// Mappings inside the generic list at `path`.
    ///
    /// Elements that are not mappings are skipped without error.
    pub fn get_map_slice(&self, path: impl Into<Path>) -> Result<Vec<Map>> {
        let path = path.into();
        match self.require(&path)? {
            Value::List(items) => Ok(items.iter().filter_map(Value::as_map).cloned().collect()),
            other => Err(Error::type_mismatch(path, "list", other)),
        }
    }

    pub fn append_slice(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<()> {
        let path = path.into();
        let mut items = or_empty(self.get_slice(&path).map(<[Value]>::to_vec))?;
        items.push(value.into());
        self.set(path, Value::List(items))
    }

    pub fn append_int_slice(&mut self, path: impl Into<Path>, value: i64) -> Result<()> {
        let path = path.into();
        let mut items = or_empty(self.get_int_slice(&path))?;
        note_conversion(self, &path, "int list");
        items.push(value);
        self.set(path, Value::IntList(items))
    }

    pub fn append_float_slice(&mut self, path: impl Into<Path>, value: f64) -> Result<()> {
        let path = path.into();
        let mut items = or_empty(self.get_float_slice(&path))?;
        note_conversion(self, &path, "float list");
        items.push(value);
        self.set(path, Value::FloatList(items))
    }

    pub fn append_string_slice(
        &mut self,
        path: impl Into<Path>,
        value: impl Into<String>,
    ) -> Result<()> {
        let path = path.into();
        let mut items = or_empty(self.get_string_slice(&path))?;
        note_conversion(self, &path, "string list");
        items.push(value.into());
        self.set(path, Value::StringList(items))
    }

    /// Append a mapping. Non-mapping elements of the existing list are
    /// dropped, as [`Document::get_map_slice`] skips them.
    pub fn append_map_slice(&mut self, path: impl Into<Path>, value: Map) -> Result<()> {
        let path = path.into();
        let mut items = or_empty(self.get_map_slice(&path))?;
        items.push(value);
        self.set(path, Value::List(items.into_iter().map(Value::Map).collect()))
    }
}
