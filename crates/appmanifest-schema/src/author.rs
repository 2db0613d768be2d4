//! Person-field parsing: `Name <email> (url)`.

use crate::value::Fields;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

/// Leading free-text name, then an optional `<email>`, then an optional `(url)`.
const PERSON_PATTERN: &str = r"^([^<(]+?)?[ \t]*(?:<([^>(]+?)>)?[ \t]*(?:\(([^)]+?)\)|$)";

fn person_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PERSON_PATTERN).expect("valid person pattern"))
}

/// Developer identity. Absent parts are omitted when serialized, never
/// written as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Author {
    /// Parse an author string. Input that does not fit the grammar yields
    /// the empty record.
    pub fn parse(input: &str) -> Self {
        let Some(caps) = person_regex().captures(input) else {
            return Self::default();
        };
        let group = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str().to_owned())
                .filter(|s| !s.is_empty())
        };
        Self {
            name: Some(caps.get(1).map_or_else(String::new, |m| m.as_str().to_owned())),
            email: group(2),
            url: group(3),
        }
    }

    /// Accept either an author string or an author-shaped object.
    ///
    /// Objects are picked verbatim: `name`, `email` and `url` are copied when
    /// they are strings, everything else is ignored.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Object(map) => {
                let pick = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_owned);
                Self {
                    name: pick("name"),
                    email: pick("email"),
                    url: pick("url"),
                }
            }
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.url.is_none()
    }

    /// Render as a field map in `name`, `email`, `url` order.
    pub fn into_fields(self) -> Fields {
        let mut out = Fields::new();
        for (key, value) in [("name", self.name), ("email", self.email), ("url", self.url)] {
            if let Some(v) = value {
                out.insert(key.to_owned(), Value::String(v));
            }
        }
        out
    }
}
