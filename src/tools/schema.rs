//! Argument validation against a tool's declared parameter schema.
//!
//! Covers the subset of JSON Schema the tool definitions actually use:
//! an object with typed `properties`, a `required` list, and per-property
//! `enum` restrictions. Anything the schema does not mention is allowed
//! through, matching JSON Schema's default-open behavior.

use serde_json::Value;

/// Check `args` against `schema`, returning a human-readable reason on the
/// first violation. The reason text is fed back to the model verbatim, so
/// it names the offending field.
pub fn validate(args: &Value, schema: &Value) -> Result<(), String> {
    if schema.get("type").and_then(Value::as_str) == Some("object") && !args.is_object() {
        return Err(format!("expected a JSON object, got {}", type_name(args)));
    }

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for field in required.iter().filter_map(Value::as_str) {
            if args.get(field).is_none() {
                return Err(format!("missing required field '{}'", field));
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };

    for (field, spec) in properties {
        let Some(value) = args.get(field) else {
            continue;
        };

        if let Some(expected) = spec.get("type").and_then(Value::as_str) {
            if !matches_type(value, expected) {
                return Err(format!(
                    "field '{}' should be {}, got {}",
                    field,
                    expected,
                    type_name(value)
                ));
            }
        }

        if let Some(allowed) = spec.get("enum").and_then(Value::as_array) {
            if !allowed.contains(value) {
                return Err(format!(
                    "field '{}' must be one of {}, got {}",
                    field,
                    Value::Array(allowed.clone()),
                    value
                ));
            }
        }
    }

    Ok(())
}

fn matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        // Unknown type keyword: do not reject what we cannot check
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
