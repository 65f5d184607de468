use serde_json::Value;
use std::collections::HashMap;

/// Pad a value with spaces on its right, up to `width` characters.
pub fn pad(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let width = args
        .get("width")
        .and_then(Value::as_u64)
        .ok_or_else(|| tera::Error::msg("The `pad` filter expects a numeric `width` argument."))?
        as usize;
    let text = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    Ok(Value::String(format!("{text:<width$}")))
}
