use super::{field_names, json_pretty, save_manifest, EXIT_SUCCESS};
use appmanifest_schema::{load_defaults_file, parse_package_file, Manifest};
use serde_json::Value;
use std::path::Path;
use tracing::info;

pub struct InitOptions<'a> {
    pub package: &'a Path,
    pub defaults: Option<&'a Path>,
    pub force: bool,
    pub ugly: bool,
}

fn ensure_can_write(dest: &Path, force: bool) -> Result<(), String> {
    if dest.exists() && !force {
        return Err(format!(
            "refusing to overwrite existing {} (pass --force)",
            dest.display()
        ));
    }
    Ok(())
}

pub fn run(dest: &Path, opts: &InitOptions<'_>, json: bool) -> Result<u8, String> {
    ensure_can_write(dest, opts.force)?;

    let mut manifest = Manifest::default();
    if let Some(defaults) = opts.defaults {
        let layer = load_defaults_file(defaults)
            .map_err(|e| format!("manifest error: defaults {}: {e}", defaults.display()))?;
        info!("applying defaults from {}", defaults.display());
        manifest.merge(&layer, false);
    }

    let descriptor = parse_package_file(opts.package).map_err(|e| {
        format!(
            "failed to read package descriptor {}: {e}",
            opts.package.display()
        )
    })?;
    manifest.merge(&Value::Object(descriptor.to_manifest_data()), false);

    save_manifest(&manifest, dest, opts.ugly)?;

    let missing = manifest.missing_fields();
    if json {
        let payload = serde_json::json!({
            "status": "written",
            "path": dest,
            "valid": missing.is_empty(),
            "missing": field_names(&missing),
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("wrote {}", dest.display());
        if !missing.is_empty() {
            eprintln!(
                "warning: missing required fields: {}",
                field_names(&missing).join(", ")
            );
        }
    }
    Ok(EXIT_SUCCESS)
}
