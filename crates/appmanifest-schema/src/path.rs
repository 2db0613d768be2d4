use crate::manifest::ManifestError;
use std::fmt;
use std::str::FromStr;

/// A dot-separated address into the manifest, e.g. `activities.dhis.href`.
///
/// Every segment is non-empty. The dotted form is kept alongside the segments
/// so that error messages and validation reports show what the caller wrote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(input: &str) -> Result<Self, ManifestError> {
        if input.is_empty() {
            return Err(ManifestError::InvalidArgument(
                "field path must not be empty".to_owned(),
            ));
        }
        let segments: Vec<String> = input.split('.').map(str::to_owned).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ManifestError::InvalidArgument(format!(
                "invalid field path '{input}': empty segment"
            )));
        }
        Ok(Self {
            raw: input.to_owned(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for FieldPath {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl PartialEq<str> for FieldPath {
    fn eq(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl PartialEq<&str> for FieldPath {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_dots() {
        let path = FieldPath::parse("activities.dhis.href").unwrap();
        assert_eq!(path.segments(), ["activities", "dhis", "href"]);
        assert_eq!(path.to_string(), "activities.dhis.href");
    }

    #[test]
    fn single_segment() {
        let path: FieldPath = "name".parse().unwrap();
        assert_eq!(path.segments(), ["name"]);
        assert_eq!(path, "name");
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            FieldPath::parse(""),
            Err(ManifestError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_empty_segments() {
        for bad in ["a..b", ".a", "a.", "."] {
            assert!(
                matches!(FieldPath::parse(bad), Err(ManifestError::InvalidArgument(_))),
                "'{bad}' should be rejected"
            );
        }
    }
}
