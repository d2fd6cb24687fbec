//! Contact unique identifiers.
//!
//! Generated identifiers are random UUID v4 values rendered as
//! `urn:uuid:` URNs, the form vCard 4.0 recommends for `UID`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::Error;

const URN_PREFIX: &str = "urn:uuid:";

/// Globally unique, opaque identifier for a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ContactUid(Uuid);

impl ContactUid {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses an identifier, with or without the `urn:uuid:` prefix.
    pub fn parse(s: &str) -> crate::Result<Self> {
        let raw = s.strip_prefix(URN_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(raw)?))
    }
}

impl Default for ContactUid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContactUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{URN_PREFIX}{}", self.0)
    }
}

impl FromStr for ContactUid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ContactUid> for String {
    fn from(uid: ContactUid) -> Self {
        uid.to_string()
    }
}

impl TryFrom<String> for ContactUid {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}
