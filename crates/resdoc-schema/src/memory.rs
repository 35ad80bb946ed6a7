use crate::registry::{FieldDecl, SchemaError, SchemaRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Declarations of one resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Type name.
    pub name: String,
    /// Ordered field declarations.
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl TypeDecl {
    /// Creates a type declaration.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    fn check(&self) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(self.malformed("field with empty name"));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(self.malformed(&format!("duplicate field {}", field.name)));
            }
        }
        Ok(())
    }

    fn malformed(&self, reason: &str) -> SchemaError {
        SchemaError::Malformed {
            type_name: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct SchemaDocument {
    types: Vec<TypeDecl>,
}

/// Immutable in-memory schema registry.
///
/// Type order is declaration order, which is also the order type detection
/// tries candidates in.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchema {
    types: Vec<TypeDecl>,
}

impl InMemorySchema {
    /// Builds a registry; type names must be unique.
    pub fn new(types: Vec<TypeDecl>) -> Result<Self, SchemaError> {
        let mut seen = BTreeSet::new();
        for decl in &types {
            if !seen.insert(decl.name.as_str()) {
                return Err(SchemaError::Parse(format!("duplicate type {}", decl.name)));
            }
        }
        Ok(Self { types })
    }

    /// Parses a schema document: `{ "types": [ { "name", "fields": [...] } ] }`.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument =
            serde_json::from_str(json).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Self::new(document.types)
    }

    /// Reads and parses a schema document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SchemaError::Parse(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Declared types in order.
    pub fn types(&self) -> &[TypeDecl] {
        &self.types
    }
}

impl SchemaRegistry for InMemorySchema {
    fn fields_of(&self, type_name: &str) -> Result<Vec<FieldDecl>, SchemaError> {
        let decl = self
            .types
            .iter()
            .find(|decl| decl.name == type_name)
            .ok_or_else(|| SchemaError::UnknownType(type_name.to_string()))?;
        // Per-type problems surface on lookup so one bad type does not
        // invalidate the whole registry.
        decl.check()?;
        Ok(decl.fields.clone())
    }

    fn known_type_names(&self) -> Vec<String> {
        self.types.iter().map(|decl| decl.name.clone()).collect()
    }
}
