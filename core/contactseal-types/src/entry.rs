//! Attribute entries: one typed, possibly grouped vCard property each.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a vCard property, e.g. `fn`, `email`, `categories`.
///
/// Stored as given; [`FieldName::canonical`] yields the trimmed,
/// lower-case form the pipeline compares against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Creates a field name from any string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the trimmed, lower-case form of this name.
    #[must_use]
    pub fn canonical(&self) -> Self {
        Self(self.0.trim().to_ascii_lowercase())
    }

    /// Returns true if this name equals `name` exactly.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for FieldName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FieldName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Value of an attribute entry.
///
/// Structured properties (`n`, `adr`, ...) carry an ordered sequence of
/// components; everything else carries a single string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Single(String),
    Multiple(Vec<String>),
}

impl PropertyValue {
    /// Returns the value components; a single value yields one component.
    #[must_use]
    pub fn components(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => vec![value.as_str()],
            Self::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Returns the single value, if this is not a multi-value.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multiple(_) => None,
        }
    }

    /// Returns true if every component is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.components().iter().all(|c| c.trim().is_empty())
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// A single typed attribute of a contact record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeEntry {
    pub field: FieldName,
    pub value: PropertyValue,
    /// Tag binding entries that travel together (e.g. an email and its settings).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// vCard `TYPE` parameter, e.g. `work` or `home`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// 1-based vCard `PREF` parameter.
    #[serde(default, rename = "pref", skip_serializing_if = "Option::is_none")]
    pub preference: Option<u32>,
}

impl AttributeEntry {
    /// Creates an ungrouped, untyped entry.
    pub fn new(field: impl Into<FieldName>, value: impl Into<PropertyValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            group: None,
            kind: None,
            preference: None,
        }
    }

    /// Sets the group tag.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the `TYPE` parameter.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the preference index.
    #[must_use]
    pub fn with_preference(mut self, preference: u32) -> Self {
        self.preference = Some(preference);
        self
    }

    /// Returns true if this entry's field is exactly `name`.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.field.is(name)
    }
}
