use super::{colorize_field, field_names, json_pretty, load_manifest, EXIT_INVALID, EXIT_SUCCESS};
use std::path::Path;

pub fn run(manifest_path: &Path, all: bool, json: bool) -> Result<u8, String> {
    let manifest = load_manifest(manifest_path)?;
    let missing = manifest.missing_fields();
    let optional = if all {
        manifest.empty_optional_fields()
    } else {
        Vec::new()
    };
    let valid = missing.is_empty();

    if json {
        let mut payload = serde_json::json!({
            "path": manifest_path,
            "valid": valid,
            "missing": field_names(&missing),
        });
        if all {
            payload["empty_optional"] = serde_json::json!(field_names(&optional));
        }
        println!("{}", json_pretty(&payload)?);
    } else {
        for field in &missing {
            println!("missing:  {}", colorize_field(field.as_str(), true));
        }
        for field in &optional {
            println!("empty:    {}", colorize_field(field.as_str(), false));
        }
        if valid {
            println!("{} is valid", manifest_path.display());
        } else {
            eprintln!(
                "{} is missing {} required field(s)",
                manifest_path.display(),
                missing.len()
            );
        }
    }

    Ok(if valid { EXIT_SUCCESS } else { EXIT_INVALID })
}
