//! Canonical serialization of one resource.

use crate::errors::NormalizeError;
use crate::identify::{backfill_relationship_ids, resolve_id, resolve_object_id};
use crate::inflect::Inflector;
use crate::resource::{kind_of, Primitive, ResourceLike};
use resdoc_canonical::{
    Document, Linkage, Relationship, Relationships, ResourceId, ResourceIdentifier, ResourceObject,
    TypeName,
};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Serializes one resource into a single-resource document.
///
/// Relationship emission is opt-in: with an empty `relationships` slice the
/// result never carries `relationships` or `included`. Otherwise the primary
/// resource gets a relationships map (one entry per declared relationship
/// present on the resource) and embedded related objects are side-loaded into
/// `included`, which may be empty at this point.
///
/// A primary resource without an identifier gets [`ResourceId::undefined`];
/// an embedded related object without one is a
/// [`NormalizeError::MissingIdentifier`], since its `included` entry could
/// not be told apart from other unidentified objects of the same type.
pub fn serialize_one(
    resource: ResourceLike,
    resource_type: &TypeName,
    relationships: &[String],
    inflector: &dyn Inflector,
) -> Result<Document, NormalizeError> {
    let has_relationships = !relationships.is_empty();

    let mut map = match resource {
        ResourceLike::Object(map) => map,
        primitive @ ResourceLike::Primitive(_) => {
            let id = resolve_id(&primitive).unwrap_or_else(ResourceId::undefined);
            let object = ResourceObject {
                resource_type: resource_type.clone(),
                id,
                attributes: Map::new(),
                relationships: has_relationships.then(Relationships::new),
            };
            return Ok(Document::single(object, has_relationships.then(Vec::new)));
        }
    };

    let id = resolve_object_id(&map).unwrap_or_else(ResourceId::undefined);
    if !has_relationships {
        map.remove("id");
        return Ok(Document::single(
            ResourceObject {
                resource_type: resource_type.clone(),
                id,
                attributes: map,
                relationships: None,
            },
            None,
        ));
    }

    backfill_relationship_ids(&mut map, relationships);
    map.remove("id");

    let mut linked = Relationships::new();
    let mut included = Included::default();
    for name in relationships {
        let Some(value) = map.remove(name) else {
            continue;
        };
        let target_type = TypeName::new(inflector.singularize(name));
        let data = match value {
            Value::Null => Linkage::Null,
            Value::Array(items) => Linkage::Many(
                items
                    .into_iter()
                    .map(|item| link_item(item, &target_type, &mut included))
                    .collect::<Result<_, _>>()?,
            ),
            item => Linkage::One(link_item(item, &target_type, &mut included)?),
        };
        linked.insert(name.clone(), Relationship::new(data));
    }

    Ok(Document::single(
        ResourceObject {
            resource_type: resource_type.clone(),
            id,
            attributes: map,
            relationships: Some(linked),
        },
        Some(included.resources),
    ))
}

/// Included resources with `(type, id)` de-duplication.
#[derive(Default)]
struct Included {
    seen: BTreeSet<ResourceIdentifier>,
    resources: Vec<ResourceObject>,
}

impl Included {
    fn push(&mut self, resource: ResourceObject) {
        if self.seen.insert(resource.identifier()) {
            self.resources.push(resource);
        }
    }
}

fn link_item(
    item: Value,
    target_type: &TypeName,
    included: &mut Included,
) -> Result<ResourceIdentifier, NormalizeError> {
    let missing = || NormalizeError::MissingIdentifier {
        resource_type: target_type.to_string(),
    };
    match item {
        Value::Object(mut map) => {
            let id = resolve_object_id(&map).ok_or_else(missing)?;
            map.remove("id");
            let resource = ResourceObject {
                resource_type: target_type.clone(),
                id,
                attributes: map,
                relationships: None,
            };
            let identifier = resource.identifier();
            included.push(resource);
            Ok(identifier)
        }
        other => match Primitive::from_value(&other) {
            Some(primitive) => {
                let id = resolve_id(&ResourceLike::Primitive(primitive)).ok_or_else(missing)?;
                Ok(ResourceIdentifier {
                    resource_type: target_type.clone(),
                    id,
                })
            }
            None => Err(NormalizeError::MalformedPayload(format!(
                "{} relationship item is a {}",
                target_type,
                kind_of(&other)
            ))),
        },
    }
}
