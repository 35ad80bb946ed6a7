//! Schema registry for resdoc.
//!
//! The normalizer only ever reads a schema through [`SchemaRegistry`]: the
//! ordered field declarations of a type, and the ordered list of known type
//! names. [`InMemorySchema`] is the reference implementation, built from
//! declarations in code or loaded from a JSON schema document.

#![deny(missing_docs)]

/// In-memory registry and its JSON loader.
pub mod memory;
/// Registry contract and field declarations.
pub mod registry;

pub use memory::{InMemorySchema, TypeDecl};
pub use registry::{FieldDecl, FieldKind, SchemaError, SchemaRegistry};
