//! Schema-driven normalization of REST payloads into canonical documents.
//!
//! This crate provides:
//! - Resource-shape inspection (type detection, collection detection,
//!   primitive-to-object coercion)
//! - Relationship discovery through a `SchemaRegistry`
//! - Identifier resolution with id back-fill for embedded related objects
//! - Canonical serialization with side-loaded `included` resources
//! - Relationship links and type correction through a relationship type map
//! - The orchestrator tying these into one pass ([`normalize_resource`])
//!
//! Core invariants:
//! - Every emitted resource object has a non-empty type and id
//! - Collection items go through exactly the same path as single resources
//! - Schema lookup failures degrade to "no relationships", never to an error
//! - The engine is synchronous and performs no I/O
//!
//! ```rust
//! use resdoc_core::{normalize_resource, RelationshipTypeMap, RequestContext};
//! use resdoc_schema::{FieldDecl, InMemorySchema, TypeDecl};
//! use serde_json::json;
//!
//! let schema = InMemorySchema::new(vec![TypeDecl::new("tag", vec![FieldDecl::field("name")])])?;
//! let request = RequestContext::new(&schema, "/api/tags");
//! let document = normalize_resource(json!({ "tags": ["ember"] }), &request, &RelationshipTypeMap::new())?;
//!
//! assert_eq!(
//!     serde_json::to_value(&document)?,
//!     json!({ "data": [ { "type": "tag", "id": "ember", "attributes": { "name": "ember" } } ] })
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
#![deny(missing_docs)]

/// Normalizer configuration and the relationship type map.
pub mod config;
/// Error types for normalization.
pub mod errors;
/// Identifier resolution.
pub mod identify;
/// Word inflection for wire keys.
pub mod inflect;
/// Resource-shape inspection.
pub mod inspect;
/// Relationship links and type rewriting.
pub mod link;
/// Orchestrator and entry points.
pub mod normalize;
/// Relationship discovery from the schema.
pub mod relationships;
/// Resource-like value classification.
pub mod resource;
/// Canonical serialization of one resource.
pub mod serialize;

pub use config::{ConfigError, NormalizerConfig, RelationshipTypeMap};
pub use errors::NormalizeError;
pub use identify::{backfill_relationship_ids, resolve_id, resolve_object_id, ID_FIELDS};
pub use inflect::{English, Inflector};
pub use inspect::{coerce_primitives, detect_type, is_collection, PrimitiveCoercion};
pub use link::{add_links, remap_included, remap_relationships};
pub use normalize::{normalize_resource, Normalized, Normalizer, RequestContext};
pub use relationships::{relationships_of, RelationshipLookup};
pub use resource::{Primitive, ResourceLike};
pub use serialize::serialize_one;
