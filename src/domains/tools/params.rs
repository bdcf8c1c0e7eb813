//! Schema-driven argument validation.
//!
//! Every tool declares a params struct deriving `Deserialize` and
//! `JsonSchema`. The generated schema is published in `tools/list` and is
//! also what incoming arguments are checked against, so a missing or
//! mistyped field is reported by name before any Hex API call is made.

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ToolError;

/// Validate `arguments` against the schema of `P`, then deserialize them.
pub fn parse_arguments<P>(arguments: &JsonObject) -> Result<P, ToolError>
where
    P: DeserializeOwned + JsonSchema + 'static,
{
    let schema = cached_schema_for_type::<P>();
    validate_arguments(&schema, arguments)?;

    serde_json::from_value(Value::Object(arguments.clone()))
        .map_err(|e| ToolError::invalid_argument("arguments", e.to_string()))
}

/// Check presence of required fields and the JSON type of known fields.
///
/// Properties the schema does not describe with a `type` are left to serde,
/// as are nulls in optional fields.
pub fn validate_arguments(schema: &JsonObject, arguments: &JsonObject) -> Result<(), ToolError> {
    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for field in required.iter().filter_map(Value::as_str) {
            if matches!(arguments.get(field), None | Some(Value::Null)) {
                return Err(ToolError::invalid_argument(
                    field,
                    "required argument is missing",
                ));
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };

    for (field, property) in properties {
        // Required nulls were rejected above; optional nulls mean "absent".
        let Some(value) = arguments.get(field).filter(|v| !v.is_null()) else {
            continue;
        };

        let allowed = allowed_types(property);
        if !allowed.is_empty() && !allowed.iter().any(|ty| type_matches(ty, value)) {
            return Err(ToolError::invalid_argument(
                field,
                format!("expected {}, got {}", allowed.join(" or "), json_type(value)),
            ));
        }

        if let Some(actual) = value.as_f64() {
            let (minimum, maximum) = numeric_bounds(property);
            if let Some(minimum) = minimum.filter(|min| actual < *min) {
                return Err(ToolError::invalid_argument(
                    field,
                    format!("must be at least {}, got {}", minimum, value),
                ));
            }
            if let Some(maximum) = maximum.filter(|max| actual > *max) {
                return Err(ToolError::invalid_argument(
                    field,
                    format!("must be at most {}, got {}", maximum, value),
                ));
            }
        }
    }

    Ok(())
}

/// Range from `minimum`/`maximum` narrowed by the integer `format` schemars
/// emits for fixed-width types (`uint32` for `u32`, and so on).
fn numeric_bounds(property: &Value) -> (Option<f64>, Option<f64>) {
    let (format_min, format_max) = match property.get("format").and_then(Value::as_str) {
        Some("uint8") => (Some(0.0), Some(u8::MAX as f64)),
        Some("uint16") => (Some(0.0), Some(u16::MAX as f64)),
        Some("uint32") => (Some(0.0), Some(u32::MAX as f64)),
        Some("int8") => (Some(i8::MIN as f64), Some(i8::MAX as f64)),
        Some("int16") => (Some(i16::MIN as f64), Some(i16::MAX as f64)),
        Some("int32") => (Some(i32::MIN as f64), Some(i32::MAX as f64)),
        Some("uint64") | Some("uint") => (Some(0.0), None),
        _ => (None, None),
    };

    let tighter = |declared: Option<f64>, implied: Option<f64>, pick: fn(f64, f64) -> f64| {
        match (declared, implied) {
            (Some(a), Some(b)) => Some(pick(a, b)),
            (a, b) => a.or(b),
        }
    };

    (
        tighter(property.get("minimum").and_then(Value::as_f64), format_min, f64::max),
        tighter(property.get("maximum").and_then(Value::as_f64), format_max, f64::min),
    )
}

fn allowed_types(property: &Value) -> Vec<&str> {
    match property.get("type") {
        Some(Value::String(ty)) => vec![ty.as_str()],
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn type_matches(ty: &str, value: &Value) -> bool {
    match ty {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
