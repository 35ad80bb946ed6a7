//! Resource-shape inspection: type detection, collection detection and
//! primitive coercion.

use crate::inflect::Inflector;
use crate::resource::{is_primitive, Primitive};
use resdoc_canonical::TypeName;
use resdoc_schema::FieldDecl;
use serde_json::{Map, Value};

/// Default preference order for the property a coerced primitive is stored under.
pub const PRIMITIVE_PROPERTY_PREFERENCE: [&str; 5] = ["name", "title", "label", "text", "value"];

/// Property used when no preferred field is declared.
pub const FALLBACK_PROPERTY: &str = "value";

/// Returns the first known type whose singular or plural key is in the payload.
///
/// Falls back to the `unknown` sentinel.
pub fn detect_type(
    known_types: &[String],
    payload: &Map<String, Value>,
    inflector: &dyn Inflector,
) -> TypeName {
    known_types
        .iter()
        .find(|candidate| {
            payload.contains_key(candidate.as_str())
                || payload.contains_key(&inflector.pluralize(candidate))
        })
        .map(|candidate| TypeName::new(candidate.as_str()))
        .unwrap_or_else(TypeName::unknown)
}

/// True iff the plural key for `resource_type` holds an array.
pub fn is_collection(
    resource_type: &TypeName,
    payload: &Map<String, Value>,
    inflector: &dyn Inflector,
) -> bool {
    matches!(
        payload.get(&inflector.pluralize(resource_type.as_str())),
        Some(Value::Array(_))
    )
}

/// Picks the property a coerced primitive is stored under.
///
/// `fields` is `None` when the schema lookup failed.
pub fn primitive_property<'a>(fields: Option<&[FieldDecl]>, preference: &'a [String]) -> &'a str {
    fields
        .and_then(|fields| {
            preference
                .iter()
                .find(|preferred| fields.iter().any(|field| &field.name == *preferred))
        })
        .map(String::as_str)
        .unwrap_or(FALLBACK_PROPERTY)
}

/// Summary of a coercion pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrimitiveCoercion {
    /// Number of elements rewritten.
    pub coerced: usize,
    /// Property the primitives were stored under, when any were coerced.
    pub property: Option<String>,
}

/// Rewrites primitive members of the plural-key array into resource objects.
///
/// Each primitive `p` becomes `{ "id": stringify(p), <property>: p }`. Object
/// members are left as they are, so re-running on coerced data is a no-op.
pub fn coerce_primitives(
    payload: &mut Map<String, Value>,
    resource_type: &TypeName,
    fields: Option<&[FieldDecl]>,
    preference: &[String],
    inflector: &dyn Inflector,
) -> PrimitiveCoercion {
    let plural = inflector.pluralize(resource_type.as_str());
    let Some(Value::Array(items)) = payload.get_mut(&plural) else {
        return PrimitiveCoercion::default();
    };
    if !items.iter().any(is_primitive) {
        return PrimitiveCoercion::default();
    }

    let property = primitive_property(fields, preference);
    let mut coerced = 0;
    for item in items.iter_mut().filter(|item| is_primitive(item)) {
        let Some(id) = Primitive::from_value(item).map(|primitive| primitive.stringify()) else {
            continue;
        };
        let original = item.take();
        let mut object = Map::new();
        object.insert("id".to_string(), Value::String(id));
        object.insert(property.to_string(), original);
        *item = Value::Object(object);
        coerced += 1;
    }

    PrimitiveCoercion {
        coerced,
        property: Some(property.to_string()),
    }
}
