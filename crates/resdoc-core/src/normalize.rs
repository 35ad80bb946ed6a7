//! Normalization orchestrator.
//!
//! One pass walks a small state machine over nesting depth:
//!
//! ```text
//! Unclassified ──plural key holds array──▶ Collection ──each item──▶ Unclassified (depth 1)
//!      │                                        │
//!      └──────────otherwise──▶ SingleResource ──┴──▶ Done
//! ```
//!
//! Collection items are wrapped under the singular key and re-enter the same
//! single-resource path used for top-level singletons. A wrapped item can
//! never classify as a collection again, which bounds recursion to one level.

use crate::config::{NormalizerConfig, RelationshipTypeMap};
use crate::errors::NormalizeError;
use crate::inflect::{English, Inflector};
use crate::inspect::{coerce_primitives, detect_type, is_collection};
use crate::link::{absent_if_empty, add_links, base_url, remap_included, remap_relationships};
use crate::relationships::{relationships_of, RelationshipLookup};
use crate::resource::{kind_of, ResourceLike};
use crate::serialize::serialize_one;
use resdoc_canonical::{
    Document, NormalizationReport, NormalizationWarning, PrimaryData, ResourceObject, TypeName,
};
use resdoc_schema::SchemaRegistry;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Per-request inputs: where to look up types, and the URL links are built from.
#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    /// Schema registry queried for fields and known types.
    pub schema: &'a dyn SchemaRegistry,
    /// Request URL, used as the base of relationship links.
    pub url: &'a str,
}

impl<'a> RequestContext<'a> {
    /// Creates a request context.
    pub fn new(schema: &'a dyn SchemaRegistry, url: &'a str) -> Self {
        Self { schema, url }
    }
}

/// A normalized document and the diagnostics gathered while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Canonical document.
    pub document: Document,
    /// Soft failures and counters.
    pub report: NormalizationReport,
}

/// Configured normalization engine.
pub struct Normalizer {
    config: NormalizerConfig,
    inflector: Box<dyn Inflector>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl Normalizer {
    /// Creates a normalizer using the English inflector plus any configured
    /// irregular words.
    pub fn new(config: NormalizerConfig) -> Self {
        let inflector = config
            .irregular_inflections
            .iter()
            .fold(English::new(), |english, (singular, plural)| {
                english.with_irregular(singular.as_str(), plural.as_str())
            });
        Self {
            config,
            inflector: Box::new(inflector),
        }
    }

    /// Replaces the inflector.
    pub fn with_inflector(mut self, inflector: impl Inflector + 'static) -> Self {
        self.inflector = Box::new(inflector);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalizes a raw payload into a canonical document.
    pub fn normalize(&self, payload: Value, request: &RequestContext<'_>) -> Result<Document, NormalizeError> {
        self.normalize_with_report(payload, request)
            .map(|normalized| normalized.document)
    }

    /// Like [`Normalizer::normalize`], also returning the normalization report.
    ///
    /// A payload matching no known type yields an empty collection and a
    /// degraded report rather than an error.
    pub fn normalize_with_report(
        &self,
        payload: Value,
        request: &RequestContext<'_>,
    ) -> Result<Normalized, NormalizeError> {
        let mut payload = match payload {
            Value::Object(map) => map,
            other => {
                return Err(NormalizeError::MalformedPayload(format!(
                    "expected an object, got {}",
                    kind_of(&other)
                )))
            }
        };
        let mut report = NormalizationReport::default();
        let inflector = self.inflector.as_ref();

        let known_types = request.schema.known_type_names();
        let resource_type = detect_type(&known_types, &payload, inflector);
        if resource_type.is_unknown() {
            warn!(keys = ?payload.keys().collect::<Vec<_>>(), "no known type matches payload");
            report.warn(NormalizationWarning::UNKNOWN_TYPE);
            report.count("resources", 0);
            report.count("included", 0);
            return Ok(Normalized {
                document: Document::collection(Vec::new(), None),
                report,
            });
        }

        let fields = request.schema.fields_of(resource_type.as_str()).ok();
        let coercion = coerce_primitives(
            &mut payload,
            &resource_type,
            fields.as_deref(),
            &self.config.primitive_property_preference,
            inflector,
        );
        if coercion.coerced > 0 {
            debug!(
                resource_type = %resource_type,
                coerced = coercion.coerced,
                property = ?coercion.property,
                "coerced primitive collection members"
            );
            report.warn(NormalizationWarning::PRIMITIVES_COERCED);
            report.count("coerced_primitives", coercion.coerced as u64);
        }

        let lookup = relationships_of(request.schema, resource_type.as_str());
        if let RelationshipLookup::Unavailable(err) = &lookup {
            warn!(resource_type = %resource_type, error = %err, "schema lookup failed; normalizing without relationships");
            report.warn(NormalizationWarning::SCHEMA_LOOKUP_FAILURE);
        }

        let pass = Pass {
            resource_type,
            relationships: lookup.names(),
            base_url: self
                .config
                .base_url
                .as_deref()
                .map(base_url)
                .unwrap_or_else(|| base_url(request.url)),
            types: &self.config.relationship_types,
            inflector,
        };
        let document = pass.drive(payload, 0)?;

        let unidentified = document
            .data
            .resources()
            .filter(|resource| resource.id.is_undefined())
            .count();
        if unidentified > 0 {
            warn!(resource_type = %pass.resource_type, unidentified, "resources have no id-bearing field");
            report.warn(NormalizationWarning::MISSING_IDENTIFIER);
            report.count("unidentified_resources", unidentified as u64);
        }
        report.count("resources", document.data.resources().count() as u64);
        report.count("included", document.included().len() as u64);
        Ok(Normalized { document, report })
    }
}

/// Normalizes `payload` with default settings and the given type corrections.
///
/// This is the engine's single entry point: it reads the schema and URL from
/// `request`, detects the payload's type, coerces primitive collections,
/// resolves relationships and drives the orchestrator once.
pub fn normalize_resource(
    payload: Value,
    request: &RequestContext<'_>,
    relationship_types: &RelationshipTypeMap,
) -> Result<Document, NormalizeError> {
    Normalizer::new(NormalizerConfig {
        relationship_types: relationship_types.clone(),
        ..NormalizerConfig::default()
    })
    .normalize(payload, request)
}

enum State {
    Unclassified(Map<String, Value>),
    Collection(Vec<Value>),
    SingleResource(Value),
    Done(Document),
}

/// Everything fixed for the duration of one pass.
struct Pass<'a> {
    resource_type: TypeName,
    relationships: Vec<String>,
    base_url: &'a str,
    types: &'a RelationshipTypeMap,
    inflector: &'a dyn Inflector,
}

impl Pass<'_> {
    fn has_relationships(&self) -> bool {
        !self.relationships.is_empty()
    }

    fn drive(&self, payload: Map<String, Value>, depth: usize) -> Result<Document, NormalizeError> {
        let mut state = State::Unclassified(payload);
        loop {
            state = match state {
                State::Unclassified(payload) => self.classify(payload, depth)?,
                State::Collection(items) => State::Done(self.collection(items, depth)?),
                State::SingleResource(value) => State::Done(self.single(value)?),
                State::Done(document) => return Ok(document),
            };
        }
    }

    fn classify(&self, mut payload: Map<String, Value>, depth: usize) -> Result<State, NormalizeError> {
        let singular = self.resource_type.as_str();
        let plural = self.inflector.pluralize(singular);

        if is_collection(&self.resource_type, &payload, self.inflector) {
            if depth > 0 {
                return Err(NormalizeError::MalformedPayload(format!(
                    "{} collection item is itself an array",
                    singular
                )));
            }
            if let Some(Value::Array(items)) = payload.remove(&plural) {
                debug!(resource_type = singular, items = items.len(), "classified as collection");
                return Ok(State::Collection(items));
            }
        }

        debug!(resource_type = singular, depth, "classified as single resource");
        payload
            .remove(singular)
            .or_else(|| payload.remove(&plural))
            .map(State::SingleResource)
            .ok_or_else(|| NormalizeError::MissingResource {
                resource_type: singular.to_string(),
                key: singular.to_string(),
            })
    }

    fn collection(&self, items: Vec<Value>, depth: usize) -> Result<Document, NormalizeError> {
        let mut data: Vec<ResourceObject> = Vec::with_capacity(items.len());
        let mut included = Vec::new();

        for item in items {
            let mut wrapped = Map::new();
            wrapped.insert(self.resource_type.as_str().to_string(), item);
            let document = self.drive(wrapped, depth + 1)?;
            match document.data {
                PrimaryData::One(resource) => data.push(*resource),
                PrimaryData::Many(_) => {
                    return Err(NormalizeError::MalformedPayload(
                        "collection item normalized to a collection".to_string(),
                    ))
                }
            }
            if self.has_relationships() {
                included.extend(document.included.unwrap_or_default());
            }
        }

        debug!(
            resource_type = %self.resource_type,
            resources = data.len(),
            included = included.len(),
            "aggregated collection"
        );
        let included = if self.has_relationships() {
            absent_if_empty(included)
        } else {
            None
        };
        Ok(Document::collection(data, included))
    }

    fn single(&self, value: Value) -> Result<Document, NormalizeError> {
        let kind = kind_of(&value);
        let resource = ResourceLike::classify(value).ok_or_else(|| {
            NormalizeError::MalformedPayload(format!("{} resource is a {}", self.resource_type, kind))
        })?;
        let mut document = serialize_one(resource, &self.resource_type, &self.relationships, self.inflector)?;

        if self.has_relationships() {
            if let PrimaryData::One(resource) = &mut document.data {
                let ResourceObject { id, relationships, .. } = resource.as_mut();
                add_links(relationships.as_mut(), self.base_url, id);
                remap_relationships(relationships.as_mut(), self.types);
            }
            document.included = document
                .included
                .and_then(|included| remap_included(included, self.types, self.inflector));
        }
        Ok(document)
    }
}
