//! Encode/decode boundary between documents and serialized formats.

use crate::document::Document;
use crate::error::CodecError;
use crate::value::Map;
use std::fmt;
use std::io::{Read, Write};
use std::path::Path as FsPath;

/// Converts between raw bytes and a document root.
pub trait Codec {
    fn decode(&self, bytes: &[u8]) -> Result<Map, CodecError>;

    fn encode(&self, map: &Map) -> Result<Vec<u8>, CodecError>;
}

/// Built-in formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Guess the format from a file extension.
    pub fn from_path(path: impl AsRef<FsPath>) -> Option<Format> {
        match path.as_ref().extension()?.to_str()? {
            "toml" => Some(Format::Toml),
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Toml => "toml",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Codec for Format {
    fn decode(&self, bytes: &[u8]) -> Result<Map, CodecError> {
        match self {
            Format::Toml => decode_toml(bytes),
            Format::Json => decode_json(bytes),
            Format::Yaml => decode_yaml(bytes),
        }
    }

    fn encode(&self, map: &Map) -> Result<Vec<u8>, CodecError> {
        match self {
            Format::Toml => encode_toml(map),
            Format::Json => encode_json(map),
            Format::Yaml => encode_yaml(map),
        }
    }
}

/// Codec built from a pair of caller-supplied functions.
///
/// ```rust
/// use docpath::{Codec, CodecError, FnCodec, Map};
///
/// let codec = FnCodec::new(
///     |bytes: &[u8]| serde_json::from_slice::<Map>(bytes).map_err(CodecError::from),
///     |map: &Map| serde_json::to_vec(map).map_err(CodecError::from),
/// );
/// let map = codec.decode(br#"{"name": "demo"}"#).unwrap();
/// assert_eq!(codec.encode(&map).unwrap(), br#"{"name":"demo"}"#);
/// ```
pub struct FnCodec<D, E> {
    decode: D,
    encode: E,
}

impl<D, E> FnCodec<D, E>
where
    D: Fn(&[u8]) -> Result<Map, CodecError>,
    E: Fn(&Map) -> Result<Vec<u8>, CodecError>,
{
    pub fn new(decode: D, encode: E) -> Self {
        Self { decode, encode }
    }
}

impl<D, E> Codec for FnCodec<D, E>
where
    D: Fn(&[u8]) -> Result<Map, CodecError>,
    E: Fn(&Map) -> Result<Vec<u8>, CodecError>,
{
    fn decode(&self, bytes: &[u8]) -> Result<Map, CodecError> {
        (self.decode)(bytes)
    }

    fn encode(&self, map: &Map) -> Result<Vec<u8>, CodecError> {
        (self.encode)(map)
    }
}

impl Document {
    pub fn decode(codec: &impl Codec, bytes: &[u8]) -> Result<Document, CodecError> {
        codec.decode(bytes).map(Document::from_map)
    }

    /// Read `reader` to the end and decode it.
    pub fn read_from(codec: &impl Codec, mut reader: impl Read) -> Result<Document, CodecError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::decode(codec, &bytes)
    }

    pub fn encode(&self, codec: &impl Codec) -> Result<Vec<u8>, CodecError> {
        codec.encode(self.root())
    }

    pub fn write_to(&self, codec: &impl Codec, mut writer: impl Write) -> Result<(), CodecError> {
        let bytes = self.encode(codec)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }
}

/// An empty (null) document decodes as an empty mapping.
#[cfg(any(feature = "json", feature = "yaml"))]
fn root_map(value: crate::value::Value) -> Result<Map, CodecError> {
    use crate::value::Value;

    match value {
        Value::Map(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(CodecError::RootNotMap {
            found: other.type_name(),
        }),
    }
}

#[cfg(feature = "json")]
fn decode_json(bytes: &[u8]) -> Result<Map, CodecError> {
    root_map(serde_json::from_slice(bytes)?)
}

#[cfg(not(feature = "json"))]
fn decode_json(_bytes: &[u8]) -> Result<Map, CodecError> {
    Err(CodecError::Unsupported("json"))
}

#[cfg(feature = "json")]
fn encode_json(map: &Map) -> Result<Vec<u8>, CodecError> {
    let mut out = serde_json::to_vec_pretty(map)?;
    out.push(b'\n');
    Ok(out)
}

#[cfg(not(feature = "json"))]
fn encode_json(_map: &Map) -> Result<Vec<u8>, CodecError> {
    Err(CodecError::Unsupported("json"))
}

#[cfg(feature = "yaml")]
fn decode_yaml(bytes: &[u8]) -> Result<Map, CodecError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    root_map(serde_yaml::from_slice(bytes)?)
}

#[cfg(not(feature = "yaml"))]
fn decode_yaml(_bytes: &[u8]) -> Result<Map, CodecError> {
    Err(CodecError::Unsupported("yaml"))
}

#[cfg(feature = "yaml")]
fn encode_yaml(map: &Map) -> Result<Vec<u8>, CodecError> {
    Ok(serde_yaml::to_string(map)?.into_bytes())
}

#[cfg(not(feature = "yaml"))]
fn encode_yaml(_map: &Map) -> Result<Vec<u8>, CodecError> {
    Err(CodecError::Unsupported("yaml"))
}

#[cfg(feature = "toml")]
fn decode_toml(bytes: &[u8]) -> Result<Map, CodecError> {
    let text = std::str::from_utf8(bytes).map_err(CodecError::custom)?;
    let table: toml::Table = toml::from_str(text)?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_convert::from_toml(value)))
        .collect())
}

#[cfg(not(feature = "toml"))]
fn decode_toml(_bytes: &[u8]) -> Result<Map, CodecError> {
    Err(CodecError::Unsupported("toml"))
}

#[cfg(feature = "toml")]
fn encode_toml(map: &Map) -> Result<Vec<u8>, CodecError> {
    let table = toml_convert::to_toml_table(map)?;
    Ok(toml::to_string(&table)?.into_bytes())
}

#[cfg(not(feature = "toml"))]
fn encode_toml(_map: &Map) -> Result<Vec<u8>, CodecError> {
    Err(CodecError::Unsupported("toml"))
}

/// TOML goes through `toml::Value` so datetimes keep their native type.
#[cfg(feature = "toml")]
mod toml_convert {
    use crate::error::CodecError;
    use crate::value::{Map, Value, format_timestamp};
    use chrono::{DateTime, Utc};

    pub(super) fn from_toml(value: toml::Value) -> Value {
        match value {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Int(i),
            toml::Value::Float(f) => Value::Float(f),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => from_datetime(&dt),
            toml::Value::Array(items) => Value::List(items.into_iter().map(from_toml).collect()),
            toml::Value::Table(table) => Value::Map(
                table
                    .into_iter()
                    .map(|(key, value)| (key, from_toml(value)))
                    .collect(),
            ),
        }
    }

    /// Offset datetimes become timestamps; local dates and times have no
    /// instant to map to and are kept as their TOML text.
    fn from_datetime(dt: &toml::value::Datetime) -> Value {
        let rendered = dt.to_string();
        match DateTime::parse_from_rfc3339(&rendered) {
            Ok(ts) => Value::Timestamp(ts.with_timezone(&Utc)),
            Err(_) => {
                tracing::debug!(datetime = %rendered, "keeping local TOML datetime as a string");
                Value::String(rendered)
            }
        }
    }

    pub(super) fn to_toml_table(map: &Map) -> Result<toml::Table, CodecError> {
        let mut table = toml::Table::new();
        for (key, value) in map {
            match to_toml(value)? {
                Some(converted) => {
                    table.insert(key.clone(), converted);
                }
                None => tracing::debug!(%key, "skipping null value, TOML has no null"),
            }
        }
        Ok(table)
    }

    fn to_toml(value: &Value) -> Result<Option<toml::Value>, CodecError> {
        let converted = match value {
            Value::Null => return Ok(None),
            Value::Bool(b) => toml::Value::Boolean(*b),
            Value::Int(i) => toml::Value::Integer(*i),
            Value::Float(f) => toml::Value::Float(*f),
            Value::String(s) => toml::Value::String(s.clone()),
            Value::Timestamp(ts) => toml::Value::Datetime(format_timestamp(ts).parse()?),
            Value::Map(map) => toml::Value::Table(to_toml_table(map)?),
            Value::List(items) => {
                let mut array = Vec::with_capacity(items.len());
                for item in items {
                    array.extend(to_toml(item)?);
                }
                toml::Value::Array(array)
            }
            Value::IntList(items) => {
                toml::Value::Array(items.iter().map(|i| toml::Value::Integer(*i)).collect())
            }
            Value::FloatList(items) => {
                toml::Value::Array(items.iter().map(|f| toml::Value::Float(*f)).collect())
            }
            Value::StringList(items) => toml::Value::Array(
                items
                    .iter()
                    .map(|s| toml::Value::String(s.clone()))
                    .collect(),
            ),
        };
        Ok(Some(converted))
    }
}
