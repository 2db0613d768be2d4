use super::{json_pretty, load_manifest, EXIT_SUCCESS};
use serde_json::Value;
use std::path::Path;

fn render(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => json_pretty(other),
    }
}

pub fn run(manifest_path: &Path, field: &str, json: bool) -> Result<u8, String> {
    let manifest = load_manifest(manifest_path)?;
    let value = manifest.field_value(field).map_err(|e| e.to_string())?;
    if json {
        let payload = serde_json::json!({
            "field": field,
            "value": value,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("{}", render(&value)?);
    }
    Ok(EXIT_SUCCESS)
}
