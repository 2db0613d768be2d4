use super::{json_pretty, load_or_default, parse_cli_value, save_manifest, EXIT_SUCCESS};
use appmanifest_schema::is_present;
use serde_json::Value;
use std::path::Path;

pub fn run(
    manifest_path: &Path,
    field: &str,
    raw_value: &str,
    as_text: bool,
    ugly: bool,
    json: bool,
) -> Result<u8, String> {
    let mut manifest = load_or_default(manifest_path)?;
    let value = if as_text {
        Value::String(raw_value.to_owned())
    } else {
        parse_cli_value(raw_value)
    };
    let removed = !is_present(&value);
    manifest
        .set_field_value(field, value)
        .map_err(|e| e.to_string())?;
    save_manifest(&manifest, manifest_path, ugly)?;

    let stored = manifest.field_value(field).map_err(|e| e.to_string())?;
    if json {
        let status = if removed { "removed" } else { "updated" };
        let payload = serde_json::json!({
            "status": status,
            "field": field,
            "value": stored,
        });
        println!("{}", json_pretty(&payload)?);
    } else if removed {
        println!("removed {field}");
    } else {
        println!("set {field}");
    }
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use appmanifest_schema::parse_manifest_file;
    use serde_json::json;

    #[test]
    fn set_creates_manifest_and_nested_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.webapp");

        run(&path, "activities.dhis.href", "*", false, false, true).unwrap();
        run(&path, "icons.48", "/48.png", false, false, true).unwrap();

        let m = parse_manifest_file(&path).unwrap();
        assert_eq!(m.field_value("activities.dhis.href").unwrap(), json!("*"));
        assert_eq!(m.field_value("icons.48").unwrap(), json!("/48.png"));
    }

    #[test]
    fn empty_value_removes_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.webapp");
        std::fs::write(&path, r#"{ "name": "app", "description": "text" }"#).unwrap();

        run(&path, "description", "", false, true, true).unwrap();

        let m = parse_manifest_file(&path).unwrap();
        assert_eq!(m.fields().len(), 1);
        assert_eq!(m.field_value("description").unwrap(), json!(""));
    }

    #[test]
    fn false_value_removes_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.webapp");
        std::fs::write(&path, r#"{ "name": "app", "installs_allowed": true }"#).unwrap();

        run(&path, "installs_allowed", "false", false, true, true).unwrap();

        let m = parse_manifest_file(&path).unwrap();
        assert!(m.fields().get("installs_allowed").is_none());
    }

    #[test]
    fn as_text_keeps_numbers_as_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.webapp");

        run(&path, "version", "2", true, true, true).unwrap();
        run(&path, "build", "2", false, true, true).unwrap();

        let m = parse_manifest_file(&path).unwrap();
        assert_eq!(m.field_value("version").unwrap(), json!("2"));
        assert_eq!(m.field_value("build").unwrap(), json!(2));
    }

    #[test]
    fn set_through_scalar_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.webapp");
        std::fs::write(&path, r#"{ "icons": "none" }"#).unwrap();
        let err = run(&path, "icons.48", "/48.png", false, true, true).unwrap_err();
        assert!(err.contains("invalid field"), "{err}");
    }
}
