//! Required/optional field presence checks.

use crate::manifest::Manifest;
use crate::path::FieldPath;
use crate::value::{is_present, Fields};
use serde_json::Value;
use std::sync::OnceLock;

/// Fields a manifest must carry before it is written, in report order.
pub const REQUIRED_FIELDS: &[&str] = &[
    "name",
    "description",
    "version",
    "icons.48",
    "developer.name",
    "launch_path",
    "default_locale",
    "activities.dhis.href",
];

/// Fields reported as empty but never required.
pub const OPTIONAL_FIELDS: &[&str] = &[
    "icons.16",
    "icons.128",
    "developer.email",
    "developer.url",
    "developer.company",
];

/// The field tables, parsed once.
#[derive(Debug)]
pub struct Schema {
    pub required: Vec<FieldPath>,
    pub optional: Vec<FieldPath>,
}

impl Schema {
    pub fn get() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| Schema {
            required: parse_table(REQUIRED_FIELDS),
            optional: parse_table(OPTIONAL_FIELDS),
        })
    }
}

fn parse_table(table: &[&str]) -> Vec<FieldPath> {
    table
        .iter()
        .map(|raw| FieldPath::parse(raw).expect("schema table holds valid paths"))
        .collect()
}

/// True when every intermediate segment is an object and the last one holds a
/// present value.
pub fn is_valid_field(target: &Fields, segments: &[String]) -> bool {
    match segments {
        [] => false,
        [only] => target.get(only).is_some_and(is_present),
        [head, rest @ ..] => target
            .get(head)
            .and_then(Value::as_object)
            .is_some_and(|nested| is_valid_field(nested, rest)),
    }
}

/// The subset of `fields` that `target` is missing, in the order given.
pub fn check_fields(target: &Fields, fields: &[FieldPath]) -> Vec<FieldPath> {
    fields
        .iter()
        .filter(|path| !is_valid_field(target, path.segments()))
        .cloned()
        .collect()
}

impl Manifest {
    pub fn missing_fields(&self) -> Vec<FieldPath> {
        check_fields(self.fields(), &Schema::get().required)
    }

    pub fn empty_optional_fields(&self) -> Vec<FieldPath> {
        check_fields(self.fields(), &Schema::get().optional)
    }

    /// Missing required fields followed by empty optional ones.
    pub fn all_empty_fields(&self) -> Vec<FieldPath> {
        let mut out = self.missing_fields();
        out.extend(self.empty_optional_fields());
        out
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
