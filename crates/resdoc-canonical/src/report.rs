use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overall outcome of a normalization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizationStatus {
    /// Everything resolved against the schema.
    Clean,
    /// A soft failure occurred, such as an unknown type or a resource
    /// with no identifier.
    Degraded,
}

/// Stable warning code emitted during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizationWarning(String);

impl NormalizationWarning {
    /// No known type matched the payload.
    pub const UNKNOWN_TYPE: &'static str = "UnknownType";
    /// Relationship metadata could not be read from the schema.
    pub const SCHEMA_LOOKUP_FAILURE: &'static str = "SchemaLookupFailure";
    /// A primary resource had no id-bearing field and got the `undefined` id.
    pub const MISSING_IDENTIFIER: &'static str = "MissingIdentifier";
    /// Primitive collection members were rewritten into objects.
    pub const PRIMITIVES_COERCED: &'static str = "PrimitivesCoerced";

    /// Creates a warning from a literal code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The warning code.
    pub fn code(&self) -> &str {
        &self.0
    }
}

/// Diagnostics gathered while normalizing one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationReport {
    /// Overall status.
    pub status: NormalizationStatus,
    /// Stable warning codes, in the order they were raised.
    pub warnings: Vec<NormalizationWarning>,
    /// Counters such as `resources` or `coerced_primitives`.
    pub metrics: BTreeMap<String, u64>,
}

impl Default for NormalizationReport {
    fn default() -> Self {
        Self {
            status: NormalizationStatus::Clean,
            warnings: Vec::new(),
            metrics: BTreeMap::new(),
        }
    }
}

impl NormalizationReport {
    /// Records a warning; degrading warnings flip the status.
    pub fn warn(&mut self, code: &str) {
        if code != NormalizationWarning::PRIMITIVES_COERCED {
            self.status = NormalizationStatus::Degraded;
        }
        self.warnings.push(NormalizationWarning::new(code));
    }

    /// Adds `by` to a named counter.
    pub fn count(&mut self, metric: &str, by: u64) {
        *self.metrics.entry(metric.to_string()).or_insert(0) += by;
    }

    /// True when the warning code was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code() == code)
    }
}
