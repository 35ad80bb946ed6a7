//! Fingerprint command implementation.

use crate::input::{load_config, load_schema, read_json};
use resdoc_canonical::Fingerprint;
use resdoc_core::{Normalizer, RequestContext};

pub fn run(
    payload: Option<String>,
    schema: String,
    url: String,
    config: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_schema(&schema)?;
    let config = load_config(config.as_deref())?;
    let payload = read_json(payload.as_deref())?;

    let request = RequestContext::new(&schema, &url);
    let document = Normalizer::new(config)
        .normalize(payload, &request)
        .map_err(|e| format!("Normalization failed: {}", e))?;
    let fingerprint = Fingerprint::of(&document)?;

    println!("{}", fingerprint.b64);
    Ok(())
}
