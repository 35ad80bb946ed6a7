//! Identifier resolution and relationship id back-fill.

use crate::resource::{Primitive, ResourceLike};
use resdoc_canonical::ResourceId;
use serde_json::{Map, Value};

/// Id-bearing fields in priority order.
pub const ID_FIELDS: [&str; 4] = ["id", "slug", "username", "name"];

/// Resolves a stable identifier for a resource-like value.
///
/// Primitives are their own identifier. Objects use the first of
/// [`ID_FIELDS`] holding a non-empty string or a number. `None` means the
/// resource cannot be identified.
pub fn resolve_id(resource: &ResourceLike) -> Option<ResourceId> {
    match resource {
        ResourceLike::Primitive(primitive) => non_empty(primitive.stringify()),
        ResourceLike::Object(map) => resolve_object_id(map),
    }
}

/// [`resolve_id`] for a bare JSON object.
pub fn resolve_object_id(map: &Map<String, Value>) -> Option<ResourceId> {
    ID_FIELDS
        .iter()
        .filter_map(|field| map.get(*field))
        .filter_map(Primitive::from_value)
        .find_map(|primitive| non_empty(primitive.stringify()))
}

fn non_empty(id: String) -> Option<ResourceId> {
    if id.trim().is_empty() {
        None
    } else {
        Some(ResourceId::new(id))
    }
}

/// Assigns an `id` to every embedded relationship object that lacks one.
///
/// Objects with no id-bearing field are left untouched and fail later at
/// serialization. Re-running is a no-op.
pub fn backfill_relationship_ids(resource: &mut Map<String, Value>, relationship_names: &[String]) {
    for name in relationship_names {
        match resource.get_mut(name) {
            Some(Value::Array(items)) => items.iter_mut().for_each(backfill_item),
            Some(item) => backfill_item(item),
            None => {}
        }
    }
}

fn backfill_item(item: &mut Value) {
    let Value::Object(map) = item else {
        return;
    };
    if map.get("id").is_some_and(|id| !id.is_null()) {
        return;
    }
    if let Some(id) = resolve_object_id(map) {
        map.insert("id".to_string(), Value::String(id.as_str().to_string()));
    }
}
