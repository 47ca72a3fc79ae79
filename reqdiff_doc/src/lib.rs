//! Loose document model for API request files.
//!
//! This crate provides:
//! - a document wrapper (`Document`) over an untyped JSON tree
//! - forgiving parsers (`parse_json`, `parse_yaml`, `parse_with_format`)
//! - dot-path accessors that default to empty values instead of failing
//! - typed views of the list records the diff engine understands
//!   (`KeyValue`, `FileEntry`, `Message`)
//!
//! Parsing never fails: input that cannot be decoded produces a document with
//! a `null` root and a [`ParseFinding`] describing why.
//!
//! # Example
//!
//! ```rust
//! use reqdiff_doc::parse_json;
//!
//! let doc = parse_json(r#"{"request": {"method": "POST", "url": "https://api.test/users"}}"#);
//! assert_eq!(doc.str_at("request.method"), "POST");
//! assert_eq!(doc.str_at("request.body.json"), "");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Serialization format of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess the format from a file extension; anything but `.yaml`/`.yml` is JSON.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }
}

/// Parser-level note explaining why a document has no usable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFinding {
    pub code: String,
    pub message: String,
}

/// Document metadata attached during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source_name: Option<String>,
    pub format: DocumentFormat,
    pub original_bytes: usize,
    pub parse_findings: Vec<ParseFinding>,
}

/// One version of a request document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub metadata: DocumentMetadata,
    pub root: Value,
}

impl Document {
    /// Create an empty (`null` root) document with caller-supplied metadata.
    pub fn new(metadata: DocumentMetadata) -> Self {
        Self {
            metadata,
            root: Value::Null,
        }
    }

    /// Wrap an already-decoded value.
    pub fn from_value(root: Value) -> Self {
        Self {
            metadata: DocumentMetadata::default(),
            root,
        }
    }

    /// Attach a display name (usually the file path) to the metadata.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.source_name = Some(name.into());
        self
    }

    /// `true` when the root is an object and sections can be read from it.
    pub fn is_object(&self) -> bool {
        self.root.is_object()
    }

    /// `true` when parsing reported a problem.
    pub fn has_parse_findings(&self) -> bool {
        !self.metadata.parse_findings.is_empty()
    }

    /// Borrow the value at a dot path such as `request.body.mode`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.root, path)
    }

    /// String at `path`, or `""` when absent or not a string.
    pub fn str_at(&self, path: &str) -> &str {
        self.get(path).and_then(Value::as_str).unwrap_or("")
    }

    /// Array at `path`, or an empty slice when absent or not an array.
    pub fn array_at(&self, path: &str) -> &[Value] {
        self.get(path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Object at `path`, or `None` when absent or not an object.
    pub fn object_at(&self, path: &str) -> Option<&Map<String, Value>> {
        self.get(path).and_then(Value::as_object)
    }
}

/// Follow a dot path through nested objects.
///
/// An empty path returns `value` itself. Any non-object step yields `None`.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

/// Parse a JSON document.
pub fn parse_json(input: &str) -> Document {
    parse_with_format(input, DocumentFormat::Json)
}

/// Parse a YAML document.
pub fn parse_yaml(input: &str) -> Document {
    parse_with_format(input, DocumentFormat::Yaml)
}

/// Parse `input` in the given format; decode failures become parse findings.
pub fn parse_with_format(input: &str, format: DocumentFormat) -> Document {
    let mut doc = Document::new(DocumentMetadata {
        source_name: None,
        format,
        original_bytes: input.len(),
        parse_findings: Vec::new(),
    });

    let decoded = match format {
        DocumentFormat::Json => serde_json::from_str::<Value>(input).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str::<Value>(input).map_err(|e| e.to_string()),
    };

    match decoded {
        Ok(root) => doc.root = root,
        Err(message) => doc.metadata.parse_findings.push(ParseFinding {
            code: "decode-failed".to_string(),
            message,
        }),
    }

    doc
}

/// Render a scalar for display and comparison.
///
/// Booleans become `"true"`/`"false"`, `null` becomes `""`, numbers use their
/// decimal form and nested values are written as compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// `true` for absent, `null`, `""`, `[]` and `{}`.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => false,
    }
}

fn opt_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value_text(value)),
    }
}

fn opt_bool(map: &Map<String, Value>, key: &str) -> Option<bool> {
    map.get(key).and_then(Value::as_bool)
}

/// Named list record: headers, params, form fields, variables, assertions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyValue {
    pub name: String,
    pub value: Option<String>,
    /// Absent is kept distinct from an explicit `false`.
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<bool>,
    /// Param placement (`query` or `path`), read from the `type` field.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl KeyValue {
    /// Read one record; non-object items become an unnamed empty record.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        Self {
            name: opt_text(map, "name").unwrap_or_default(),
            value: opt_text(map, "value"),
            enabled: opt_bool(map, "enabled"),
            local: opt_bool(map, "local"),
            kind: opt_text(map, "type"),
        }
    }

    /// Read every record of a list.
    pub fn list(values: &[Value]) -> Vec<Self> {
        values.iter().map(Self::from_value).collect()
    }

    /// `true` unless explicitly disabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// One entry of a `file` body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileEntry {
    pub file_path: Option<String>,
    pub content_type: Option<String>,
    pub selected: Option<bool>,
}

impl FileEntry {
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        Self {
            file_path: opt_text(map, "filePath").filter(|p| !p.is_empty()),
            content_type: opt_text(map, "contentType"),
            selected: opt_bool(map, "selected"),
        }
    }

    pub fn list(values: &[Value]) -> Vec<Self> {
        values.iter().map(Self::from_value).collect()
    }
}

/// One message of a gRPC or WebSocket body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub content: String,
}

impl Message {
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        Self {
            name: opt_text(map, "name"),
            kind: opt_text(map, "type"),
            content: opt_text(map, "content").unwrap_or_default(),
        }
    }

    pub fn list(values: &[Value]) -> Vec<Self> {
        values.iter().map(Self::from_value).collect()
    }
}
