//! `PATH:VALUE` overrides applied on top of a loaded document.

use crate::document::Document;
use crate::error::{OverrideError, Result};
use crate::path::Path;
use crate::value::{TIME_FORMAT, Value};
use chrono::NaiveDateTime;
use std::str::FromStr;

/// A single parsed override such as `meta.owner:alice`.
#[derive(Debug, Clone, PartialEq)]
pub struct Override {
    pub path: Path,
    pub value: Value,
}

impl Override {
    /// Split `raw` at its first `:` and coerce the literal after it.
    ///
    /// The literal is tried as a timestamp ([`TIME_FORMAT`]), an integer, a
    /// float and a boolean, in that order; anything else stays a string. So
    /// `port:10` always stores an int, whatever the field held before.
    pub fn parse(raw: &str) -> std::result::Result<Self, OverrideError> {
        let (path, literal) = raw
            .split_once(':')
            .ok_or_else(|| OverrideError::MissingSeparator(raw.to_string()))?;
        if path.is_empty() {
            return Err(OverrideError::EmptyPath(raw.to_string()));
        }
        Ok(Self {
            path: Path::parse(path),
            value: parse_literal(literal),
        })
    }

    pub fn apply(&self, doc: &mut Document) -> Result<()> {
        tracing::debug!(path = %self.path, kind = self.value.type_name(), "applying override");
        doc.set(&self.path, self.value.clone())
    }
}

impl FromStr for Override {
    type Err = OverrideError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Override::parse(s)
    }
}

impl Document {
    /// Apply overrides in order; later ones win.
    pub fn apply_overrides<'a>(
        &mut self,
        overrides: impl IntoIterator<Item = &'a Override>,
    ) -> Result<()> {
        for item in overrides {
            item.apply(self)?;
        }
        Ok(())
    }
}

fn parse_literal(raw: &str) -> Value {
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, TIME_FORMAT) {
        return Value::Timestamp(ts.and_utc());
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::Float(f);
    }
    if let Some(b) = parse_bool(raw) {
        return Value::Bool(b);
    }
    Value::String(raw.to_string())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
