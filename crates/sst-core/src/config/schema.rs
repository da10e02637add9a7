//! JSON Schema validation for protocol configuration.

use std::sync::OnceLock;

/// Embedded configuration schema (loaded at compile time).
const PROTOCOL_SCHEMA_JSON: &str = include_str!("../../../../schema/protocol.schema.json");

static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

fn get_validator() -> Result<&'static jsonschema::Validator, String> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = serde_json::from_str(PROTOCOL_SCHEMA_JSON)
            .map_err(|e| format!("Invalid schema JSON: {}", e))?;

        jsonschema::options()
            .build(&schema_value)
            .map_err(|e| format!("Failed to compile schema: {}", e))
    });

    result.as_ref().map_err(Clone::clone)
}

/// Validate a configuration document against the schema.
///
/// Returns every violation, each suffixed with its instance path.
pub fn validate_config_schema(config_json: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e])?;

    let errors: Vec<String> = validator
        .iter_errors(config_json)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check a configuration document without collecting messages.
pub fn is_valid_config(config_json: &serde_json::Value) -> bool {
    get_validator()
        .map(|v| v.is_valid(config_json))
        .unwrap_or(false)
}
