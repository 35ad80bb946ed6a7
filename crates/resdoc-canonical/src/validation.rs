use thiserror::Error;

/// Validation errors for canonical primitives and documents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// A linkage points at a resource that is neither included nor primary data.
    #[error("relationship {relationship} on {owner} references {target}, which is not in the document")]
    DanglingLinkage {
        /// `type/id` of the resource carrying the relationship.
        owner: String,
        /// Relationship name.
        relationship: String,
        /// `type/id` of the missing target.
        target: String,
    },
}
