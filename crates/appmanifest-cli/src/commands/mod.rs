pub mod completions;
pub mod get;
pub mod init;
pub mod man_pages;
pub mod merge;
pub mod set;
pub mod show;
pub mod validate;

use appmanifest_schema::{parse_manifest_file, FieldPath, Manifest};
use serde_json::Value;
use std::path::Path;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_MANIFEST_ERROR: u8 = 2;
pub const EXIT_INVALID: u8 = 3;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn load_manifest(path: &Path) -> Result<Manifest, String> {
    parse_manifest_file(path).map_err(|e| format!("manifest error: {}: {e}", path.display()))
}

/// Load the manifest at `path`, or start empty if there is none yet.
pub fn load_or_default(path: &Path) -> Result<Manifest, String> {
    if path.exists() {
        load_manifest(path)
    } else {
        Ok(Manifest::default())
    }
}

pub fn save_manifest(manifest: &Manifest, path: &Path, ugly: bool) -> Result<(), String> {
    manifest
        .write_manifest_file(path, ugly)
        .map_err(|e| format!("failed to write manifest {}: {e}", path.display()))
}

/// Interpret a command-line value. Objects, arrays, numbers and booleans are
/// taken as JSON; anything else (including `null`) is stored as text.
pub fn parse_cli_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(v @ (Value::Object(_) | Value::Array(_) | Value::Number(_) | Value::Bool(_))) => v,
        _ => Value::String(raw.to_owned()),
    }
}

pub fn field_names(fields: &[FieldPath]) -> Vec<&str> {
    fields.iter().map(FieldPath::as_str).collect()
}

pub fn colorize_field(field: &str, required: bool) -> String {
    use console::Style;
    if required {
        Style::new().red().bold().apply_to(field).to_string()
    } else {
        Style::new().yellow().apply_to(field).to_string()
    }
}
