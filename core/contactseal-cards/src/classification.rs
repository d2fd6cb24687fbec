//! Static field classification tables.

use std::collections::BTreeSet;

use contactseal_types::{fields, FieldName};
use serde::{Deserialize, Serialize};

/// Which fields may be stored in the clear and which must be signed.
///
/// A field in neither set is encrypted. A field in both sets is
/// dual-classified: when a record has a clear-text tier it lands in the
/// clear-text and signed tiers at once.
///
/// Names are compared in their canonical (trimmed, lower-case) form on
/// both sides, so `FN` and `fn` classify alike.
/// Build once and share; the tables never change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Tables", into = "Tables")]
pub struct FieldClassification {
    clear_eligible: BTreeSet<String>,
    signed_eligible: BTreeSet<String>,
}

impl FieldClassification {
    /// Builds tables from any two lists of field names.
    pub fn new<C, S>(clear_eligible: C, signed_eligible: S) -> Self
    where
        C: IntoIterator,
        C::Item: Into<FieldName>,
        S: IntoIterator,
        S::Item: Into<FieldName>,
    {
        Self {
            clear_eligible: canonical_set(clear_eligible),
            signed_eligible: canonical_set(signed_eligible),
        }
    }

    #[must_use]
    pub fn is_clear_eligible(&self, field: &FieldName) -> bool {
        self.clear_eligible.contains(field.canonical().as_str())
    }

    #[must_use]
    pub fn is_signed_eligible(&self, field: &FieldName) -> bool {
        self.signed_eligible.contains(field.canonical().as_str())
    }

    /// True if `field` is in both tables.
    #[must_use]
    pub fn is_dual(&self, field: &FieldName) -> bool {
        self.is_clear_eligible(field) && self.is_signed_eligible(field)
    }

    pub fn clear_eligible(&self) -> impl Iterator<Item = &str> {
        self.clear_eligible.iter().map(String::as_str)
    }

    pub fn signed_eligible(&self) -> impl Iterator<Item = &str> {
        self.signed_eligible.iter().map(String::as_str)
    }
}

impl Default for FieldClassification {
    /// The production tables.
    fn default() -> Self {
        Self::new(
            [fields::VERSION, fields::PRODID, fields::CATEGORIES],
            [
                fields::VERSION,
                fields::PRODID,
                fields::FN,
                fields::UID,
                fields::EMAIL,
            ],
        )
    }
}

fn canonical_set<I>(names: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: Into<FieldName>,
{
    names
        .into_iter()
        .map(|name| Into::<FieldName>::into(name).canonical().as_str().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Wire shape of [`FieldClassification`]. A missing table keeps its
/// production default.
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct Tables {
    clear_eligible: Vec<String>,
    signed_eligible: Vec<String>,
}

impl Default for Tables {
    fn default() -> Self {
        FieldClassification::default().into()
    }
}

impl From<Tables> for FieldClassification {
    fn from(tables: Tables) -> Self {
        Self::new(tables.clear_eligible, tables.signed_eligible)
    }
}

impl From<FieldClassification> for Tables {
    fn from(classification: FieldClassification) -> Self {
        Self {
            clear_eligible: classification.clear_eligible.into_iter().collect(),
            signed_eligible: classification.signed_eligible.into_iter().collect(),
        }
    }
}
