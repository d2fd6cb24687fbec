//! Splits a record's entries into trust tiers.

use contactseal_types::{fields, AttributeEntry, Tier};

use crate::classification::FieldClassification;

/// Entries of one record, bucketed by tier. Each bucket keeps the relative
/// input order of its entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub to_encrypt_and_sign: Vec<AttributeEntry>,
    pub to_sign: Vec<AttributeEntry>,
    pub to_clear_text: Vec<AttributeEntry>,
}

impl Partition {
    /// Returns the bucket for `tier`.
    #[must_use]
    pub fn bucket(&self, tier: Tier) -> &[AttributeEntry] {
        match tier {
            Tier::EncryptedAndSigned => &self.to_encrypt_and_sign,
            Tier::Signed => &self.to_sign,
            Tier::ClearText => &self.to_clear_text,
        }
    }

    /// Tiers with at least one entry, in emission order.
    #[must_use]
    pub fn non_empty_tiers(&self) -> Vec<Tier> {
        Tier::EMISSION_ORDER
            .into_iter()
            .filter(|&tier| !self.bucket(tier).is_empty())
            .collect()
    }

    /// Sum of the bucket sizes. Exceeds the input length by the number of
    /// dual-classified entries.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.to_encrypt_and_sign.len() + self.to_sign.len() + self.to_clear_text.len()
    }
}

/// Classifies every entry into at least one bucket.
///
/// A clear-text tier exists only when the record has a `categories` entry.
/// When it does, clear-eligible fields go to it, and fields that are also
/// signed-eligible are copied into the signed bucket as well. Otherwise
/// signed-eligible fields are signed and everything else is encrypted.
pub fn partition(entries: &[AttributeEntry], classification: &FieldClassification) -> Partition {
    let split_clear_text = entries
        .iter()
        .any(|entry| entry.field.canonical().is(fields::CATEGORIES));
    let mut out = Partition::default();

    for entry in entries {
        if split_clear_text && classification.is_clear_eligible(&entry.field) {
            out.to_clear_text.push(entry.clone());
            if classification.is_signed_eligible(&entry.field) {
                out.to_sign.push(entry.clone());
            }
        } else if classification.is_signed_eligible(&entry.field) {
            out.to_sign.push(entry.clone());
        } else {
            out.to_encrypt_and_sign.push(entry.clone());
        }
    }

    out
}
