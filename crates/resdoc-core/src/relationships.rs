//! Schema query adapter.

use resdoc_schema::{FieldDecl, SchemaError, SchemaRegistry};

/// Outcome of asking the schema for a type's relationships.
///
/// `Unavailable` behaves exactly like a type without relationships: the
/// resource is still normalized, only without `relationships`/`included`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipLookup {
    /// Relationship fields in declaration order (possibly none).
    Declared(Vec<FieldDecl>),
    /// The schema could not answer.
    Unavailable(SchemaError),
}

impl RelationshipLookup {
    /// Relationship field names; empty when unavailable.
    pub fn names(&self) -> Vec<String> {
        match self {
            RelationshipLookup::Declared(fields) => fields.iter().map(|f| f.name.clone()).collect(),
            RelationshipLookup::Unavailable(_) => Vec::new(),
        }
    }

    /// True when at least one relationship is declared.
    pub fn has_relationships(&self) -> bool {
        matches!(self, RelationshipLookup::Declared(fields) if !fields.is_empty())
    }
}

/// Filters a type's declared fields down to `belongsTo`/`hasMany`.
pub fn relationships_of(schema: &dyn SchemaRegistry, resource_type: &str) -> RelationshipLookup {
    match schema.fields_of(resource_type) {
        Ok(fields) => RelationshipLookup::Declared(
            fields
                .into_iter()
                .filter(|field| field.kind.is_relationship())
                .collect(),
        ),
        Err(err) => RelationshipLookup::Unavailable(err),
    }
}
