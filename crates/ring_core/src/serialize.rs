use std::fmt;
use std::str::FromStr;

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::emit::emit_document;
use crate::{DocumentTree, Mapping, Scalar, SerializeError, UnknownFormatError};

/// Format a merged document is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl OutputFormat {
    /// Maps a file extension (without the dot) to a format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Yaml => "application/yaml",
            OutputFormat::Json => "application/json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OutputFormat::from_extension(value.trim())
            .ok_or_else(|| UnknownFormatError(value.to_string()))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per JSON indentation level; 0 renders compact JSON.
    pub json_indent: usize,
}

/// Renders an annotated document. The output always ends with a newline.
pub fn serialize(
    document: &Mapping,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String, SerializeError> {
    match format {
        OutputFormat::Yaml => Ok(emit_document(document)),
        OutputFormat::Json => {
            let mut text = if options.json_indent == 0 {
                serde_json::to_string(document)?
            } else {
                let indent = " ".repeat(options.json_indent);
                let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
                let mut buffer = Vec::new();
                let mut serializer =
                    serde_json::Serializer::with_formatter(&mut buffer, formatter);
                document.serialize(&mut serializer)?;
                String::from_utf8_lossy(&buffer).into_owned()
            };
            text.push('\n');
            Ok(text)
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(value) => serializer.serialize_bool(*value),
            Scalar::Int(value) => serializer.serialize_i64(*value),
            Scalar::UInt(value) => serializer.serialize_u64(*value),
            Scalar::Float(value) if value.is_finite() => serializer.serialize_f64(*value),
            Scalar::Float(value) => Err(S::Error::custom(format!(
                "number {} has no json representation",
                format_non_finite(*value)
            ))),
            Scalar::String(text) | Scalar::Quoted(text) => serializer.serialize_str(text),
        }
    }
}

fn format_non_finite(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value.is_sign_positive() {
        "+infinity"
    } else {
        "-infinity"
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            let Some(name) = key.as_str() else {
                return Err(S::Error::custom(format!(
                    "mapping key `{key}` is not a string"
                )));
            };
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for DocumentTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocumentTree::Scalar(scalar) => scalar.serialize(serializer),
            DocumentTree::Mapping(mapping) => mapping.serialize(serializer),
            DocumentTree::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}
