use canonical_json::to_string;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Error returned when canonical encoding fails.
#[derive(thiserror::Error, Debug)]
pub enum EncodingError {
    /// Value could not be converted to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// The canonical encoder rejected the value.
    #[error("canonicalization failed: {0}")]
    Canonicalization(String),
}

/// JSON path used to locate offending values.
#[derive(Debug, Clone, Default)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Produces RFC 8785 canonical bytes for JSON values and documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonicalizer;

impl Canonicalizer {
    /// Creates a canonicalizer.
    pub fn new() -> Self {
        Self
    }

    /// Canonical bytes of an arbitrary JSON value.
    pub fn canonicalize(&self, value: &Value) -> Result<Vec<u8>, EncodingError> {
        check_finite(value, Path::default())?;
        let canonical =
            to_string(value).map_err(|err| EncodingError::Canonicalization(err.to_string()))?;
        Ok(canonical.into_bytes())
    }

    /// Canonical bytes of any serializable value, typically a `Document`.
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, EncodingError> {
        let value = serde_json::to_value(value)?;
        self.canonicalize(&value)
    }
}

fn check_finite(value: &Value, path: Path) -> Result<(), EncodingError> {
    match value {
        Value::Object(map) => map
            .iter()
            .try_for_each(|(key, child)| check_finite(child, path.push_field(key))),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(idx, item)| check_finite(item, path.push_index(idx))),
        Value::Number(num) => match num.as_f64() {
            Some(f) if num.is_f64() && !f.is_finite() => {
                Err(EncodingError::NonFiniteNumber(path.to_string()))
            }
            _ => Ok(()),
        },
        Value::String(_) | Value::Bool(_) | Value::Null => Ok(()),
    }
}
