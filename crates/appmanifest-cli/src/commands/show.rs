use super::{load_manifest, EXIT_SUCCESS};
use std::path::Path;

pub fn run(manifest_path: &Path, ugly: bool) -> Result<u8, String> {
    let manifest = load_manifest(manifest_path)?;
    let rendered = manifest.to_json(ugly).map_err(|e| e.to_string())?;
    println!("{rendered}");
    Ok(EXIT_SUCCESS)
}
