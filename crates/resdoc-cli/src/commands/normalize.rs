//! Normalize command implementation.

use crate::input::{load_config, load_schema, read_json};
use crate::output::format_json;
use resdoc_core::{Normalizer, RelationshipTypeMap, RequestContext};
use serde_json::json;

pub struct Options {
    pub payload: Option<String>,
    pub schema: String,
    pub url: String,
    pub config: Option<String>,
    pub type_map: Vec<String>,
    pub report: bool,
    pub compact: bool,
}

pub fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_schema(&options.schema)?;
    let mut config = load_config(options.config.as_deref())?;
    // Command-line mappings win over the config file.
    let overrides = options
        .type_map
        .iter()
        .map(|entry| RelationshipTypeMap::parse_entry(entry))
        .collect::<Result<Vec<_>, _>>()?;
    config.relationship_types.extend(overrides);

    let payload = read_json(options.payload.as_deref())?;
    let request = RequestContext::new(&schema, &options.url);
    let normalized = Normalizer::new(config)
        .normalize_with_report(payload, &request)
        .map_err(|e| format!("Normalization failed: {}", e))?;

    tracing::debug!(
        status = ?normalized.report.status,
        warnings = normalized.report.warnings.len(),
        "normalized payload"
    );

    let rendered = if options.report {
        format_json(
            &json!({ "document": normalized.document, "report": normalized.report }),
            options.compact,
        )
    } else {
        format_json(&normalized.document, options.compact)
    };
    println!("{}", rendered);
    Ok(())
}
