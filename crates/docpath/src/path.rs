use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Ordered list of keys addressing a value inside a document.
///
/// A dotted string (`"database.url"`) is split on `.`; use the slice or array
/// forms when a key itself contains a dot. The empty path addresses the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The empty path (document root).
    pub fn root() -> Self {
        Self::default()
    }

    /// Split a dotted string into segments.
    ///
    /// `""` is the root path. Empty segments (`"a..b"`) are kept as keys
    /// named `""`.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self {
            segments: dotted.split('.').map(str::to_string).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment and the segments leading to it.
    pub fn split_last(&self) -> Option<(&String, &[String])> {
        self.segments.split_last()
    }

    /// Path of the enclosing mapping, `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        self.split_last().map(|(_, parents)| Path {
            segments: parents.to_vec(),
        })
    }

    /// Produce a copy of this path extended by `key`.
    pub fn child(&self, key: impl Into<String>) -> Path {
        let mut segments = self.segments.clone();
        segments.push(key.into());
        Path { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl From<&str> for Path {
    fn from(dotted: &str) -> Self {
        Path::parse(dotted)
    }
}

impl From<String> for Path {
    fn from(dotted: String) -> Self {
        Path::parse(&dotted)
    }
}

impl From<&String> for Path {
    fn from(dotted: &String) -> Self {
        Path::parse(dotted)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Path { segments }
    }
}

impl From<Vec<&str>> for Path {
    fn from(segments: Vec<&str>) -> Self {
        segments.as_slice().into()
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Path {
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl From<&[String]> for Path {
    fn from(segments: &[String]) -> Self {
        Path {
            segments: segments.to_vec(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        segments.as_slice().into()
    }
}
