use thiserror::Error;

/// Errors that abort a normalization pass.
///
/// Schema lookup failures are not represented here: they degrade to "no
/// relationships" and are reported through the normalization report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Payload or one of its values has a shape the normalizer cannot read.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    /// No resource was found under the detected type's keys.
    #[error("no resource under `{key}` for type {resource_type}")]
    MissingResource {
        /// Detected type.
        resource_type: String,
        /// Singular key that was looked up.
        key: String,
    },
    /// An embedded related object has none of `id`, `slug`, `username`, `name`.
    #[error("{resource_type} resource has none of id, slug, username, name")]
    MissingIdentifier {
        /// Type of the resource lacking an identifier.
        resource_type: String,
    },
}
