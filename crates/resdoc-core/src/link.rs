//! Relationship links and post-serialization type correction.

use crate::config::RelationshipTypeMap;
use crate::inflect::Inflector;
use resdoc_canonical::{RelationshipLinks, Relationships, ResourceId, ResourceObject};

/// Base URL for links: the request URL without query, fragment or trailing `/`.
pub fn base_url(url: &str) -> &str {
    let end = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
    url[..end].trim_end_matches('/')
}

/// Sets `related` and `self` links on every relationship. No-op when absent.
pub fn add_links(relationships: Option<&mut Relationships>, base_url: &str, resource_id: &ResourceId) {
    let Some(relationships) = relationships else {
        return;
    };
    for (name, relationship) in relationships.iter_mut() {
        relationship.links = Some(RelationshipLinks {
            related: format!("{}/{}/{}", base_url, resource_id, name),
            self_link: format!("{}/{}/relationships/{}", base_url, resource_id, name),
        });
    }
}

/// Forces the linkage type of every mapped relationship, in place.
pub fn remap_relationships(relationships: Option<&mut Relationships>, types: &RelationshipTypeMap) {
    let Some(relationships) = relationships else {
        return;
    };
    for (name, relationship) in relationships.iter_mut() {
        if let Some(mapped) = types.get(name) {
            for identifier in relationship.data.identifiers_mut() {
                identifier.resource_type = mapped.clone();
            }
        }
    }
}

/// Rewrites included resource types through the map.
///
/// An empty list becomes `None`. Each item is looked up by its type, then by
/// the pluralized type (to-many relationships are keyed by their plural
/// name); unmapped items pass through.
pub fn remap_included(
    included: Vec<ResourceObject>,
    types: &RelationshipTypeMap,
    inflector: &dyn Inflector,
) -> Option<Vec<ResourceObject>> {
    if included.is_empty() {
        return None;
    }
    Some(
        included
            .into_iter()
            .map(|mut resource| {
                let current = resource.resource_type.as_str();
                let mapped = types
                    .get(current)
                    .or_else(|| types.get(&inflector.pluralize(current)))
                    .cloned();
                if let Some(mapped) = mapped {
                    resource.resource_type = mapped;
                }
                resource
            })
            .collect(),
    )
}

/// Canonical absence for an aggregated included list.
pub fn absent_if_empty(included: Vec<ResourceObject>) -> Option<Vec<ResourceObject>> {
    if included.is_empty() {
        None
    } else {
        Some(included)
    }
}
