use resdoc_canonical::{
    Canonicalizer, Document, Fingerprint, FingerprintAlg, Linkage, NormalizationReport,
    NormalizationStatus, NormalizationWarning, Relationship, RelationshipLinks, ResourceId,
    ResourceIdentifier, ResourceObject, TypeName, ValidationError,
};
use serde_json::{json, Map};
use std::collections::BTreeMap;

fn article_with_author(author_id: &str) -> ResourceObject {
    let mut attributes = Map::new();
    attributes.insert("title".into(), json!("X"));
    let mut relationships = BTreeMap::new();
    relationships.insert(
        "author".to_string(),
        Relationship {
            data: Linkage::One(ResourceIdentifier::new("user", author_id)),
            links: Some(RelationshipLinks {
                self_link: "/api/articles/1/relationships/author".into(),
                related: "/api/articles/1/author".into(),
            }),
        },
    );
    ResourceObject {
        resource_type: TypeName::new("article"),
        id: ResourceId::new("1"),
        attributes,
        relationships: Some(relationships),
    }
}

fn user(id: &str) -> ResourceObject {
    ResourceObject {
        resource_type: TypeName::new("user"),
        id: ResourceId::new(id),
        attributes: Map::new(),
        relationships: None,
    }
}

#[test]
fn document_serializes_to_golden_json() {
    let document = Document::single(article_with_author("jd"), Some(vec![user("jd")]));

    assert_eq!(
        serde_json::to_value(&document).unwrap(),
        json!({
            "data": {
                "type": "article",
                "id": "1",
                "attributes": { "title": "X" },
                "relationships": {
                    "author": {
                        "data": { "type": "user", "id": "jd" },
                        "links": {
                            "self": "/api/articles/1/relationships/author",
                            "related": "/api/articles/1/author"
                        }
                    }
                }
            },
            "included": [
                { "type": "user", "id": "jd", "attributes": {} }
            ]
        })
    );
}

#[test]
fn absent_included_and_relationships_are_omitted() {
    let document = Document::collection(vec![user("a")], None);
    assert_eq!(
        serde_json::to_value(&document).unwrap(),
        json!({ "data": [ { "type": "user", "id": "a", "attributes": {} } ] })
    );
}

#[test]
fn null_and_many_linkage_shapes() {
    assert_eq!(serde_json::to_value(Linkage::Null).unwrap(), json!(null));
    assert_eq!(
        serde_json::to_value(Linkage::Many(vec![ResourceIdentifier::new("tag", "rust")])).unwrap(),
        json!([{ "type": "tag", "id": "rust" }])
    );
    let parsed: Relationship = serde_json::from_value(json!({ "data": null })).unwrap();
    assert_eq!(parsed.data, Linkage::Null);
}

#[test]
fn document_round_trips_through_json() {
    let document = Document::single(article_with_author("jd"), Some(vec![user("jd")]));
    let value = serde_json::to_value(&document).unwrap();
    let parsed: Document = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, document);
}

#[test]
fn identifiers_validate_patterns() {
    assert!(TypeName::parse("blog-post").is_ok());
    assert!(TypeName::parse("").is_err());
    assert!(TypeName::parse("9lives").is_err());
    assert!(ResourceId::parse("ember").is_ok());
    assert!(ResourceId::parse("with space inside").is_ok());
    assert!(ResourceId::parse("").is_err());
    assert!(ResourceId::parse("   ").is_err());
    assert!(ResourceId::parse(" padded").is_ok());
    assert!(ResourceId::parse("line\nbreak").is_ok());
    assert!(TypeName::unknown().is_unknown());
    assert!(ResourceId::undefined().is_undefined());
    assert!(ResourceId::parse(ResourceId::UNDEFINED).is_ok());
}

#[test]
fn validate_accepts_resolvable_linkage() {
    let document = Document::single(article_with_author("jd"), Some(vec![user("jd")]));
    assert!(document.validate().is_ok());

    // Linkage to a type that is never side-loaded is a bare reference.
    let document = Document::single(article_with_author("jd"), None);
    assert!(document.validate().is_ok());
}

#[test]
fn validate_reports_dangling_linkage() {
    let document = Document::single(article_with_author("jd"), Some(vec![user("someone-else")]));
    let errors = document.validate().unwrap_err();
    assert_eq!(
        errors,
        vec![ValidationError::DanglingLinkage {
            owner: "article/1".into(),
            relationship: "author".into(),
            target: "user/jd".into(),
        }]
    );
}

#[test]
fn validate_reports_empty_ids() {
    let document = Document::collection(vec![user("")], None);
    let errors = document.validate().unwrap_err();
    assert!(matches!(
        errors[0],
        ValidationError::PatternMismatch { field: "ResourceId", .. }
    ));
}

#[test]
fn canonicalizer_produces_ordered_bytes() {
    let bytes = Canonicalizer::new()
        .canonicalize(&json!({"b": 1, "a": {"nested": 2}}))
        .unwrap();
    assert_eq!(bytes, br#"{"a":{"nested":2},"b":1}"#.to_vec());
}

#[test]
fn fingerprint_is_stable_and_content_sensitive() {
    let first = Fingerprint::of(&Document::single(user("a"), None)).unwrap();
    let again = Fingerprint::of(&Document::single(user("a"), None)).unwrap();
    let other = Fingerprint::of(&Document::single(user("b"), None)).unwrap();

    assert_eq!(first, again);
    assert_ne!(first, other);
    assert_eq!(first.alg, FingerprintAlg::Sha256);
    assert!(Fingerprint::new(FingerprintAlg::Sha256, first.b64.clone()).is_ok());
    assert!(Fingerprint::new(FingerprintAlg::Sha256, "short").is_err());
}

#[test]
fn report_tracks_status_and_metrics() {
    let mut report = NormalizationReport::default();
    report.warn(NormalizationWarning::PRIMITIVES_COERCED);
    report.count("coerced_primitives", 2);
    assert_eq!(report.status, NormalizationStatus::Clean);

    report.warn(NormalizationWarning::SCHEMA_LOOKUP_FAILURE);
    report.count("coerced_primitives", 1);
    assert_eq!(report.status, NormalizationStatus::Degraded);
    assert!(report.has_warning("SchemaLookupFailure"));
    assert_eq!(report.metrics["coerced_primitives"], 3);

    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({
            "status": "Degraded",
            "warnings": ["PrimitivesCoerced", "SchemaLookupFailure"],
            "metrics": { "coerced_primitives": 3 }
        })
    );
}

#[test]
fn missing_identifier_warning_degrades() {
    let mut report = NormalizationReport::default();
    report.warn(NormalizationWarning::MISSING_IDENTIFIER);
    assert_eq!(report.status, NormalizationStatus::Degraded);
    assert!(report.has_warning("MissingIdentifier"));
}
