//! Deriving manifest data from a package descriptor (`package.json`).

use crate::author::Author;
use crate::manifest::{Manifest, ManifestError};
use crate::value::{is_present, Fields};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Key under which a descriptor may embed manifest-native overrides.
pub const OVERRIDES_KEY: &str = "manifest.webapp";

/// The descriptor keys that feed a manifest. Everything else in the
/// descriptor is ignored. Scalar keys are passed through as-is, whatever
/// their JSON type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageDescriptor {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    /// Author string or author object; takes precedence over `developer`
    /// when present.
    #[serde(default)]
    pub author: Option<Value>,
    #[serde(default)]
    pub developer: Option<Fields>,
    #[serde(default)]
    pub icons: Option<Fields>,
    #[serde(default)]
    pub launch_path: Option<Value>,
    #[serde(default)]
    pub default_locale: Option<Value>,
    #[serde(default)]
    pub activities: Option<Fields>,
    /// Open map of manifest fields, overlaid last.
    #[serde(default, rename = "manifest.webapp")]
    pub overrides: Option<Fields>,
}

impl PackageDescriptor {
    /// Extract manifest data. Keys the descriptor does not carry, or carries
    /// with an absent value, are not emitted.
    pub fn to_manifest_data(&self) -> Fields {
        let mut out = Fields::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(v) = value.filter(is_present) {
                out.insert(key.to_owned(), v);
            }
        };

        put("name", self.name.clone());
        put("version", self.version.clone());
        put("description", self.description.clone());

        let developer = match self.author.as_ref().filter(|v| is_present(v)) {
            Some(author) => Some(Author::from_value(author).into_fields()),
            None => self.developer.clone(),
        };
        put("developer", developer.map(Value::Object));

        put("icons", self.icons.clone().map(Value::Object));
        put("launch_path", self.launch_path.clone());
        put("default_locale", self.default_locale.clone());
        put("activities", self.activities.clone().map(Value::Object));

        if let Some(overrides) = &self.overrides {
            debug!("applying {} '{OVERRIDES_KEY}' override(s)", overrides.len());
            out.extend(overrides.clone());
        }
        out
    }
}

pub fn parse_package_str(input: &str) -> Result<PackageDescriptor, ManifestError> {
    Ok(serde_json::from_str(input)?)
}

/// Read and parse a descriptor. Failures are logged before being returned.
pub fn parse_package_file(path: impl AsRef<Path>) -> Result<PackageDescriptor, ManifestError> {
    let path = path.as_ref();
    let result = fs::read_to_string(path)
        .map_err(ManifestError::from)
        .and_then(|content| parse_package_str(&content));
    if let Err(e) = &result {
        error!("failed to read package descriptor {}: {e}", path.display());
    }
    result
}

/// Load a defaults layer. `.toml` files are read as TOML, anything else as
/// JSON. The document root must be a table/object.
pub fn load_defaults_file(path: impl AsRef<Path>) -> Result<Value, ManifestError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let value: Value = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    if value.is_object() {
        Ok(value)
    } else {
        Err(ManifestError::NotAnObject)
    }
}

impl Manifest {
    pub fn from_package(descriptor: &PackageDescriptor) -> Self {
        Self::new(descriptor.to_manifest_data())
    }

    pub fn from_package_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        Ok(Self::from_package(&parse_package_file(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PACKAGE: &str = r#"{
        "name": "dashboard",
        "version": "1.2.0",
        "description": "A dashboard app",
        "author": "Jane <jane@x.com> (http://x.com)",
        "developer": { "name": "ignored" },
        "scripts": { "build": "webpack" },
        "icons": { "48": "/48.png" },
        "launch_path": "index.html",
        "default_locale": "en",
        "activities": { "dhis": { "href": "*" } }
    }"#;

    #[test]
    fn extracts_known_keys_in_order() {
        let data = parse_package_str(PACKAGE).unwrap().to_manifest_data();
        let keys: Vec<&str> = data.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "version",
                "description",
                "developer",
                "icons",
                "launch_path",
                "default_locale",
                "activities"
            ]
        );
        assert_eq!(
            data["developer"],
            json!({ "name": "Jane", "email": "jane@x.com", "url": "http://x.com" })
        );
    }

    #[test]
    fn derived_manifest_is_valid() {
        let m = Manifest::from_package(&parse_package_str(PACKAGE).unwrap());
        assert!(m.is_valid(), "missing: {:?}", m.missing_fields());
    }

    #[test]
    fn developer_used_without_author() {
        let pkg = parse_package_str(r#"{ "developer": { "name": "Org", "company": "Acme" } }"#)
            .unwrap();
        let data = pkg.to_manifest_data();
        assert_eq!(data["developer"], json!({ "name": "Org", "company": "Acme" }));
    }

    #[test]
    fn empty_author_falls_back_to_developer() {
        for author in [r#""""#, "null"] {
            let pkg = parse_package_str(&format!(
                r#"{{ "author": {author}, "developer": {{ "name": "Org" }} }}"#
            ))
            .unwrap();
            assert_eq!(
                pkg.to_manifest_data()["developer"],
                json!({ "name": "Org" }),
                "author {author}"
            );
        }
    }

    #[test]
    fn scalar_keys_pass_through_any_type() {
        let data = parse_package_str(r#"{ "name": "app", "version": 1, "description": "" }"#)
            .unwrap()
            .to_manifest_data();
        assert_eq!(Value::Object(data), json!({ "name": "app", "version": 1 }));
    }

    #[test]
    fn author_object_is_picked() {
        let pkg =
            parse_package_str(r#"{ "author": { "name": "Org", "url": "https://org.example" } }"#)
                .unwrap();
        assert_eq!(
            pkg.to_manifest_data()["developer"],
            json!({ "name": "Org", "url": "https://org.example" })
        );
    }

    #[test]
    fn absent_keys_not_emitted() {
        let data = parse_package_str(r#"{ "name": "only" }"#)
            .unwrap()
            .to_manifest_data();
        assert_eq!(Value::Object(data), json!({ "name": "only" }));
    }

    #[test]
    fn overrides_overlay_last() {
        let pkg = parse_package_str(
            r#"{
                "name": "pkg-name",
                "icons": { "48": "/pkg.png" },
                "manifest.webapp": {
                    "name": "Pretty Name",
                    "icons": { "128": "/128.png" },
                    "appType": "APP"
                }
            }"#,
        )
        .unwrap();
        let data = pkg.to_manifest_data();
        assert_eq!(data["name"], json!("Pretty Name"));
        assert_eq!(data["icons"], json!({ "128": "/128.png" }));
        assert_eq!(data["appType"], json!("APP"));
    }

    #[test]
    fn missing_package_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::from_package_file(dir.path().join("package.json")).unwrap_err();
        assert!(matches!(err, ManifestError::Io(_)));
    }

    #[test]
    fn loads_toml_and_json_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("defaults.toml");
        std::fs::write(
            &toml_path,
            "default_locale = \"en\"\nlaunch_path = \"index.html\"\n\n[activities.dhis]\nhref = \"*\"\n",
        )
        .unwrap();
        let json_path = dir.path().join("defaults.json");
        std::fs::write(&json_path, r#"{ "default_locale": "fr" }"#).unwrap();

        let from_toml = load_defaults_file(&toml_path).unwrap();
        assert_eq!(from_toml["activities"]["dhis"]["href"], json!("*"));
        let from_json = load_defaults_file(&json_path).unwrap();
        assert_eq!(from_json["default_locale"], json!("fr"));
    }

    #[test]
    fn defaults_must_be_an_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defaults.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            load_defaults_file(&path),
            Err(ManifestError::NotAnObject)
        ));
    }
}
