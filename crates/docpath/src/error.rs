use crate::path::Path;
use crate::value::Value;
use std::fmt;
use thiserror::Error;

/// Errors returned by document accessors.
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing is stored at the path (or the stored value is null).
    #[error("value for {path} not found")]
    NotFound { path: Path },

    /// A value is stored at the path but the accessor cannot use it.
    #[error("cannot convert {path} to {expected}: found {found}")]
    TypeMismatch {
        path: Path,
        expected: &'static str,
        found: &'static str,
    },

    /// `set` and `delete` need at least one segment.
    #[error("path must not be empty")]
    EmptyPath,

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl Error {
    pub(crate) fn not_found(path: impl Into<Path>) -> Self {
        Error::NotFound { path: path.into() }
    }

    pub(crate) fn type_mismatch(
        path: impl Into<Path>,
        expected: &'static str,
        found: &Value,
    ) -> Self {
        Error::TypeMismatch {
            path: path.into(),
            expected,
            found: found.type_name(),
        }
    }

    /// Whether the path was absent. Callers usually fall back to a default here.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }
}

/// Errors raised at the encode/decode boundary.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "toml")]
    #[error("TOML parse error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[cfg(feature = "toml")]
    #[error("TOML datetime error: {0}")]
    TomlDatetime(#[from] toml::value::DatetimeParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Decoded data was a scalar or sequence instead of a mapping.
    #[error("document root must be a mapping, found {found}")]
    RootNotMap { found: &'static str },

    /// The format was compiled out.
    #[error("{0} support disabled")]
    Unsupported(&'static str),

    /// Error produced by a caller-supplied codec function.
    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl CodecError {
    pub fn custom(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        CodecError::Custom(err.into())
    }
}

/// A leaf still holding the required-field placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredViolation {
    /// Dotted path of the leaf.
    pub path: String,
}

impl fmt::Display for RequiredViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is required, please specify it with {}:<value>",
            self.path, self.path
        )
    }
}

impl std::error::Error for RequiredViolation {}

/// Aggregated required-field violations across a whole document.
#[derive(Debug)]
pub struct ValidationErrors {
    violations: Vec<RequiredViolation>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Dotted paths of every violation, in report order.
    pub fn paths(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.path.as_str()).collect()
    }
}

impl From<Vec<RequiredViolation>> for ValidationErrors {
    fn from(violations: Vec<RequiredViolation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return write!(f, "no validation errors");
        }
        writeln!(f, "validation failed:")?;
        for violation in &self.violations {
            writeln!(f, "  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Malformed `PATH:VALUE` override.
#[derive(Debug, Error)]
pub enum OverrideError {
    #[error("override `{0}` must have the form PATH:VALUE")]
    MissingSeparator(String),

    #[error("override `{0}` has an empty path")]
    EmptyPath(String),
}

/// Result alias for document operations.
pub type Result<T> = std::result::Result<T, Error>;
