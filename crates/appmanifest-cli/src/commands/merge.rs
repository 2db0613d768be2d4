use super::{json_pretty, load_or_default, save_manifest, EXIT_SUCCESS};
use serde_json::Value;
use std::path::Path;
use tracing::info;

fn read_layer(path: &Path) -> Result<Value, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("manifest error: {}: {e}", path.display()))
}

pub fn run(
    manifest_path: &Path,
    data_path: &Path,
    force: bool,
    ugly: bool,
    json: bool,
) -> Result<u8, String> {
    let mut manifest = load_or_default(manifest_path)?;
    let layer = read_layer(data_path)?;
    if !layer.is_object() {
        return Err(format!(
            "manifest error: {}: expected a JSON object",
            data_path.display()
        ));
    }
    info!("merging {} (force: {force})", data_path.display());
    manifest.merge(&layer, force);
    save_manifest(&manifest, manifest_path, ugly)?;

    if json {
        let payload = serde_json::json!({
            "status": "merged",
            "path": manifest_path,
            "force": force,
            "valid": manifest.is_valid(),
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("merged {} into {}", data_path.display(), manifest_path.display());
    }
    Ok(EXIT_SUCCESS)
}
