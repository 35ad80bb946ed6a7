//! Canonical document model for normalized REST resources.
//!
//! A canonical document carries primary `data` (one resource object or an
//! ordered collection) and optional `included` side-resources. Every resource
//! object has a declared type, a stable id, plain attributes and, for types
//! that declare them, typed relationships with navigation links.
//!
#![deny(missing_docs)]

/// Document, resource object and relationship types.
pub mod document;
/// RFC 8785 canonical encoding.
pub mod encoding;
/// Content fingerprints over canonical bytes.
pub mod fingerprint;
/// Validated identifier newtypes.
pub mod identifiers;
/// Diagnostics report produced by a normalization pass.
pub mod report;
/// Validation errors.
pub mod validation;

pub use document::{
    Document, Linkage, PrimaryData, Relationship, RelationshipLinks, Relationships,
    ResourceIdentifier, ResourceObject,
};
pub use encoding::{Canonicalizer, EncodingError};
pub use fingerprint::{Fingerprint, FingerprintAlg};
pub use identifiers::{ResourceId, TypeName};
pub use report::{NormalizationReport, NormalizationStatus, NormalizationWarning};
pub use validation::ValidationError;
