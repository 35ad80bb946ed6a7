//! Detect command implementation.

use crate::input::{load_schema, read_json};
use crate::output::{format_detection_row, format_json, print_detection_header};
use resdoc_core::{detect_type, is_collection, English, Inflector};
use resdoc_schema::SchemaRegistry;
use serde_json::{json, Value};

pub fn run(payload: Option<String>, schema: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_schema(&schema)?;
    let payload = match read_json(payload.as_deref())? {
        Value::Object(map) => map,
        _ => return Err("payload must be a JSON object".into()),
    };

    let english = English::new();
    let resource_type = detect_type(&schema.known_type_names(), &payload, &english);
    let collection = is_collection(&resource_type, &payload, &english);
    let (shape, count) = if collection {
        let items = payload
            .get(&english.pluralize(resource_type.as_str()))
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        ("collection", items)
    } else {
        ("single", 1)
    };

    if json {
        println!(
            "{}",
            format_json(
                &json!({ "type": resource_type, "shape": shape, "items": count }),
                true
            )
        );
    } else {
        print_detection_header();
        println!("{}", format_detection_row(resource_type.as_str(), shape, count));
    }
    Ok(())
}
