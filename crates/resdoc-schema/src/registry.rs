use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Plain attribute.
    Field,
    /// To-one relationship.
    BelongsTo,
    /// To-many relationship.
    HasMany,
}

impl FieldKind {
    /// True for `belongsTo` and `hasMany`.
    pub fn is_relationship(self) -> bool {
        matches!(self, FieldKind::BelongsTo | FieldKind::HasMany)
    }
}

/// One field declaration of a resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDecl {
    /// Field kind.
    pub kind: FieldKind,
    /// Field name as it appears on the wire.
    pub name: String,
    /// Declared target type of a relationship.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
}

impl FieldDecl {
    /// Plain attribute declaration.
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Field,
            name: name.into(),
            target_type: None,
        }
    }

    /// To-one relationship declaration.
    pub fn belongs_to(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::BelongsTo,
            name: name.into(),
            target_type: Some(target_type.into()),
        }
    }

    /// To-many relationship declaration.
    pub fn has_many(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::HasMany,
            name: name.into(),
            target_type: Some(target_type.into()),
        }
    }
}

/// Errors raised by schema lookups and loading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The registry has no such type.
    #[error("unknown type: {0}")]
    UnknownType(String),
    /// The type's declarations are unusable.
    #[error("malformed declaration for type {type_name}: {reason}")]
    Malformed {
        /// Type whose declarations are malformed.
        type_name: String,
        /// What is wrong.
        reason: String,
    },
    /// The schema document could not be parsed.
    #[error("invalid schema document: {0}")]
    Parse(String),
}

/// Read-only schema contract consumed by the normalizer.
///
/// Implementations must be side-effect free; the normalizer may query the
/// same registry from several threads.
pub trait SchemaRegistry: Send + Sync {
    /// Ordered field declarations of `type_name`.
    fn fields_of(&self, type_name: &str) -> Result<Vec<FieldDecl>, SchemaError>;

    /// Ordered names of every known type.
    fn known_type_names(&self) -> Vec<String>;
}
