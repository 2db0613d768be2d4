use crate::author::Author;
use crate::path::FieldPath;
use crate::value::{clean, is_present, Fields};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, error};

pub(crate) const DEVELOPER_KEY: &str = "developer";
pub(crate) const DEVELOPER_NAME: &str = "developer.name";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid field '{path}': segment '{segment}' holds a value, not an object")]
    InvalidField { path: String, segment: String },
    #[error("manifest I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("failed to parse TOML: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("expected a JSON object at the document root")]
    NotAnObject,
}

/// The application manifest: an ordered, arbitrarily nested field map.
///
/// A manifest is built once from seed data and then enriched in place by
/// [`Manifest::merge`] and [`Manifest::set_field_value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    fields: Fields,
}

impl Manifest {
    /// Seed a manifest with the top-level keys of `data`. Nothing is validated.
    pub fn new(data: Fields) -> Self {
        Self { fields: data }
    }

    /// Like [`Manifest::new`]; a non-object `data` gives an empty manifest.
    pub fn from_value(data: Value) -> Self {
        match data {
            Value::Object(map) => Self::new(map),
            _ => Self::default(),
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }

    /// Merge a partial manifest into this one.
    ///
    /// Scalars overwrite only when present, or unconditionally when `force`
    /// is set. Objects are merged one level deep: incoming keys overwrite,
    /// existing keys not mentioned are kept. Without `force`, absent leaves
    /// are cleaned out of the incoming object first, so they never erase
    /// existing values. With `force`, the incoming object replaces the
    /// existing one wholesale: keys only the existing object carries are
    /// lost, so force-merging `{"developer": {"url": ..}}` drops
    /// `developer.name`.
    ///
    /// A `developer` object whose `name` is an author string has that string
    /// expanded into `name`, `email` and `url` before merging.
    ///
    /// Non-object `data` is ignored.
    pub fn merge(&mut self, data: &Value, force: bool) -> &mut Self {
        let Some(data) = data.as_object() else {
            debug!("ignoring non-object merge data");
            return self;
        };

        for (key, value) in data {
            let Value::Object(nested) = value else {
                if force || is_present(value) {
                    self.fields.insert(key.clone(), value.clone());
                }
                continue;
            };

            let mut nested = nested.clone();
            if key == DEVELOPER_KEY {
                if let Some(name) = nested.get("name").filter(|v| is_present(v)) {
                    let author = Author::from_value(name);
                    nested.extend(author.into_fields());
                }
            }

            if force {
                debug!("force-merging '{key}'");
                self.fields.insert(key.clone(), Value::Object(nested));
                continue;
            }

            let incoming = clean(&nested);
            let slot = self
                .fields
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Fields::new()));
            if !slot.is_object() {
                *slot = Value::Object(Fields::new());
            }
            if let Value::Object(existing) = slot {
                existing.extend(incoming);
            }
        }
        self
    }

    /// Write `value` at a dotted `path`, creating intermediate objects.
    ///
    /// An absent value (see [`crate::value::is_present`]) removes the field
    /// instead. Writing `developer.name` parses the value as an author and
    /// replaces the whole `developer` object with the result.
    pub fn set_field_value(&mut self, path: &str, value: Value) -> Result<(), ManifestError> {
        let path = FieldPath::parse(path)?;

        if path == DEVELOPER_NAME {
            let author = Author::from_value(&value);
            debug!("setting developer from author {author:?}");
            self.fields
                .insert(DEVELOPER_KEY.to_owned(), Value::Object(author.into_fields()));
            return Ok(());
        }

        let remove = !is_present(&value);
        let (last, parents) = path
            .segments()
            .split_last()
            .ok_or_else(|| ManifestError::InvalidArgument("empty field path".to_owned()))?;

        let mut current = &mut self.fields;
        for segment in parents {
            let absent = current.get(segment).filter(|v| !v.is_null()).is_none();
            if absent {
                if remove {
                    return Ok(());
                }
                current.insert(segment.clone(), Value::Object(Fields::new()));
            }
            current = match current.get_mut(segment) {
                Some(Value::Object(map)) => map,
                _ => {
                    return Err(ManifestError::InvalidField {
                        path: path.to_string(),
                        segment: segment.clone(),
                    })
                }
            };
        }

        if remove {
            debug!("removing field '{path}'");
            current.shift_remove(last);
        } else {
            debug!("setting field '{path}'");
            current.insert(last.clone(), value);
        }
        Ok(())
    }

    /// Read the value at a dotted `path`.
    ///
    /// Missing fields, including paths that run through a scalar, read as the
    /// empty string. Only a malformed path is an error.
    pub fn field_value(&self, path: &str) -> Result<Value, ManifestError> {
        let path = FieldPath::parse(path)?;
        Ok(self
            .lookup(&path)
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| Value::String(String::new())))
    }

    pub(crate) fn lookup(&self, path: &FieldPath) -> Option<&Value> {
        let (last, parents) = path.segments().split_last()?;
        let mut current = &self.fields;
        for segment in parents {
            current = current.get(segment)?.as_object()?;
        }
        current.get(last)
    }

    /// Serialize: two-space indented, or compact when `ugly` is set.
    pub fn to_json(&self, ugly: bool) -> Result<String, ManifestError> {
        let json = if ugly {
            serde_json::to_string(&self.fields)?
        } else {
            serde_json::to_string_pretty(&self.fields)?
        };
        Ok(json)
    }

    /// Atomically write the manifest to `dest`.
    ///
    /// Failures are logged and returned to the caller.
    pub fn write_manifest_file(&self, dest: &Path, ugly: bool) -> Result<(), ManifestError> {
        let result = self
            .to_json(ugly)
            .and_then(|json| write_atomic(dest, &json));
        if let Err(e) = &result {
            error!("failed to write manifest {}: {e}", dest.display());
        }
        result
    }
}

fn write_atomic(dest: &Path, content: &str) -> Result<(), ManifestError> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

pub fn parse_manifest_str(input: &str) -> Result<Manifest, ManifestError> {
    match serde_json::from_str(input)? {
        Value::Object(map) => Ok(Manifest::new(map)),
        _ => Err(ManifestError::NotAnObject),
    }
}

pub fn parse_manifest_file(path: impl AsRef<Path>) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(path)?;
    parse_manifest_str(&content)
}
