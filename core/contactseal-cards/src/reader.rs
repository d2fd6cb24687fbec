//! Reads prepared records back into entries for display and export.

use std::collections::HashSet;

use contactseal_crypto::{decrypt, verify_detached, CryptoError, KeyPair};
use contactseal_types::{fields, AttributeEntry, Card, PreparedRecord, Tier};
use contactseal_vcard::{parse, serialize, VcardResult};
use thiserror::Error;
use tracing::warn;

/// A non-fatal problem found while opening a card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardIssue {
    #[error("{tier} card has no signature")]
    SignatureMissing { tier: Tier },

    #[error("{tier} card signature does not verify")]
    SignatureInvalid { tier: Tier },

    #[error("{tier} card could not be decrypted: {reason}")]
    DecryptionFailed { tier: Tier, reason: String },

    #[error("{tier} card could not be read: {reason}")]
    Unparseable { tier: Tier, reason: String },
}

impl CardIssue {
    #[must_use]
    pub fn tier(&self) -> Tier {
        match self {
            Self::SignatureMissing { tier }
            | Self::SignatureInvalid { tier }
            | Self::DecryptionFailed { tier, .. }
            | Self::Unparseable { tier, .. } => *tier,
        }
    }
}

/// Entries recovered from a prepared record plus any problems found.
///
/// Entries from a card whose signature failed are still included, so a
/// caller can show the contact along with a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenedRecord {
    pub entries: Vec<AttributeEntry>,
    pub issues: Vec<CardIssue>,
}

impl OpenedRecord {
    /// True if every card decrypted, verified and parsed.
    #[must_use]
    pub fn is_intact(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Decrypts and verifies every card with `key_pair` and merges the entries.
///
/// Entries are merged encrypted first, then signed, then clear-text.
/// Identical entries (such as a dual-classified field present in two
/// cards) and repeated `VERSION` lines appear once.
pub fn open_record(record: &PreparedRecord, key_pair: &KeyPair) -> OpenedRecord {
    let mut cards: Vec<&Card> = record.cards.iter().collect();
    cards.sort_by_key(|card| emission_rank(card.tier));

    let mut opened = OpenedRecord::default();
    let mut seen = HashSet::new();
    let mut has_version = false;

    for card in cards {
        let entries = match open_card(card, key_pair, &mut opened.issues) {
            Some(entries) => entries,
            None => continue,
        };
        for entry in entries {
            if entry.is(fields::VERSION) {
                if has_version {
                    continue;
                }
                has_version = true;
            }
            if seen.insert(entry.clone()) {
                opened.entries.push(entry);
            }
        }
    }

    for issue in &opened.issues {
        warn!("Opening record: {}", issue);
    }
    opened
}

/// Serializes merged entries into a single vCard.
pub fn export_vcard(entries: &[AttributeEntry]) -> VcardResult<String> {
    serialize(entries)
}

fn emission_rank(tier: Tier) -> usize {
    Tier::EMISSION_ORDER
        .iter()
        .position(|&t| t == tier)
        .unwrap_or(Tier::EMISSION_ORDER.len())
}

fn open_card(
    card: &Card,
    key_pair: &KeyPair,
    issues: &mut Vec<CardIssue>,
) -> Option<Vec<AttributeEntry>> {
    let tier = card.tier;
    let Some(data) = card.data.as_deref() else {
        issues.push(CardIssue::Unparseable {
            tier,
            reason: "card has no data".to_string(),
        });
        return None;
    };

    let text = match tier {
        Tier::EncryptedAndSigned => match decrypt(data, &key_pair.private_key) {
            Ok(text) => text,
            Err(e) => {
                issues.push(CardIssue::DecryptionFailed {
                    tier,
                    reason: e.to_string(),
                });
                return None;
            }
        },
        Tier::Signed | Tier::ClearText => data.to_string(),
    };

    if tier.is_signed() {
        if let Some(issue) = check_signature(card, &text, key_pair) {
            issues.push(issue);
        }
    }

    match parse(&text) {
        Ok(entries) => Some(entries),
        Err(e) => {
            issues.push(CardIssue::Unparseable {
                tier,
                reason: e.to_string(),
            });
            None
        }
    }
}

fn check_signature(card: &Card, text: &str, key_pair: &KeyPair) -> Option<CardIssue> {
    let tier = card.tier;
    let Some(signature) = card.signature.as_deref() else {
        return Some(CardIssue::SignatureMissing { tier });
    };
    match verify_detached(text, signature, std::slice::from_ref(&key_pair.public_key)) {
        Ok(()) => None,
        Err(CryptoError::SignatureInvalid) => Some(CardIssue::SignatureInvalid { tier }),
        Err(e) => Some(CardIssue::Unparseable {
            tier,
            reason: format!("signature: {e}"),
        }),
    }
}
