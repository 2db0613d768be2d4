//! Web app manifest model for appmanifest.
//!
//! This crate defines the manifest layer: the ordered field store
//! (`Manifest`), schema-aware merging, dot-path get/set (`FieldPath`),
//! required/optional field validation (`Schema`), author-string parsing
//! (`Author`), and extraction from a package descriptor
//! (`PackageDescriptor`).

pub mod author;
pub mod manifest;
pub mod package;
pub mod path;
pub mod schema;
pub mod value;

pub use author::Author;
pub use manifest::{parse_manifest_file, parse_manifest_str, Manifest, ManifestError};
pub use package::{
    load_defaults_file, parse_package_file, parse_package_str, PackageDescriptor, OVERRIDES_KEY,
};
pub use path::FieldPath;
pub use schema::{check_fields, is_valid_field, Schema, OPTIONAL_FIELDS, REQUIRED_FIELDS};
pub use value::{clean, is_present, Fields};
