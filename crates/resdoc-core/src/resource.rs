//! Tagged representation of resource-like payload values.

use serde_json::{Map, Number, Value};

/// A primitive standing in for a whole resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    /// String primitive.
    Str(String),
    /// Numeric primitive.
    Num(Number),
}

impl Primitive {
    /// Classifies a JSON value as a primitive, if it is one.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Primitive::Str(s.clone())),
            Value::Number(n) => Some(Primitive::Num(n.clone())),
            _ => None,
        }
    }

    /// String form, used as the implicit identifier.
    ///
    /// Whole-valued floats print without a fractional part, so `1.0` and `1`
    /// identify the same resource.
    pub fn stringify(&self) -> String {
        match self {
            Primitive::Str(s) => s.clone(),
            Primitive::Num(n) if n.is_f64() => {
                n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
            }
            Primitive::Num(n) => n.to_string(),
        }
    }

    /// Converts back into a JSON value.
    pub fn into_value(self) -> Value {
        match self {
            Primitive::Str(s) => Value::String(s),
            Primitive::Num(n) => Value::Number(n),
        }
    }
}

/// Either a bare primitive or a resource object.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceLike {
    /// Primitive used as both value and identifier.
    Primitive(Primitive),
    /// Object with optional id-bearing fields and relationship sub-objects.
    Object(Map<String, Value>),
}

impl ResourceLike {
    /// Classifies an owned JSON value. Booleans, nulls and arrays are not
    /// resource-like.
    pub fn classify(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(ResourceLike::Object(map)),
            other => Primitive::from_value(&other).map(ResourceLike::Primitive),
        }
    }
}

/// True for string and number values.
pub fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_))
}

/// Short description of a value's JSON kind, for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
