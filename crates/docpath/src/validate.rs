//! Required-field validation.

use crate::document::Document;
use crate::error::{RequiredViolation, ValidationErrors};
use crate::value::Value;

/// Placeholder marking a field that must be overridden before use.
pub const REQUIRED: &str = "[REQUIRED]";

/// Types that can check themselves for unset required fields.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl Document {
    /// Every leaf still equal to [`REQUIRED`], in depth-first key order.
    ///
    /// Sequences are leaves; their elements are not inspected.
    pub fn required_violations(&self) -> Vec<RequiredViolation> {
        let mut violations = Vec::new();
        // Children are pushed in reverse so they pop in ascending key order.
        let mut stack: Vec<(String, &Value)> = self
            .root()
            .iter()
            .rev()
            .map(|(key, value)| (key.clone(), value))
            .collect();

        while let Some((path, node)) = stack.pop() {
            match node {
                Value::Map(children) => stack.extend(
                    children
                        .iter()
                        .rev()
                        .map(|(key, value)| (format!("{path}.{key}"), value)),
                ),
                Value::String(s) if s == REQUIRED => {
                    tracing::debug!(%path, "required field left unset");
                    violations.push(RequiredViolation { path });
                }
                _ => {}
            }
        }

        violations
    }
}

impl Validate for Document {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let violations = self.required_violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.into())
        }
    }
}
