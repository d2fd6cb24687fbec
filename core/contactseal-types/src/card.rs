//! Trust tiers and the cards emitted for them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Error;

/// Trust tier an entry is stored under.
///
/// The numeric codes are the transport `Type` values; code 1 is reserved
/// for an encrypted-only tier this pipeline never produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tier {
    /// Readable by the server, no signature.
    ClearText,
    /// Readable by the server, tamper-evident.
    Signed,
    /// Opaque to the server, tamper-evident.
    EncryptedAndSigned,
}

impl Tier {
    /// Emission order of cards within a prepared record.
    pub const EMISSION_ORDER: [Tier; 3] = [Tier::EncryptedAndSigned, Tier::Signed, Tier::ClearText];

    /// Transport code of this tier.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::ClearText => 0,
            Self::Signed => 2,
            Self::EncryptedAndSigned => 3,
        }
    }

    /// Looks up a tier by transport code.
    pub fn from_code(code: u8) -> crate::Result<Self> {
        match code {
            0 => Ok(Self::ClearText),
            2 => Ok(Self::Signed),
            3 => Ok(Self::EncryptedAndSigned),
            other => Err(Error::UnknownTier(other)),
        }
    }

    /// Whether cards of this tier carry a detached signature.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        !matches!(self, Self::ClearText)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ClearText => "clear-text",
            Self::Signed => "signed",
            Self::EncryptedAndSigned => "encrypted-and-signed",
        };
        f.write_str(name)
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.code()
    }
}

impl TryFrom<u8> for Tier {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

/// One protected serialization of a tier's entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Card {
    #[serde(rename = "Type")]
    pub tier: Tier,
    /// vCard text, or the armored ciphertext for encrypted cards.
    pub data: Option<String>,
    /// Armored detached signature over the vCard text.
    pub signature: Option<String>,
}

impl Card {
    /// Card holding an encrypted vCard and a signature over its plaintext.
    pub fn encrypted_and_signed(data: String, signature: String) -> Self {
        Self {
            tier: Tier::EncryptedAndSigned,
            data: Some(data),
            signature: Some(signature),
        }
    }

    /// Card holding a plain vCard and a signature over exactly that text.
    pub fn signed(data: String, signature: String) -> Self {
        Self {
            tier: Tier::Signed,
            data: Some(data),
            signature: Some(signature),
        }
    }

    /// Card holding a plain, unsigned vCard.
    pub fn clear_text(data: String) -> Self {
        Self {
            tier: Tier::ClearText,
            data: Some(data),
            signature: None,
        }
    }
}

/// The ordered cards for one contact record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedRecord {
    #[serde(rename = "Cards")]
    pub cards: Vec<Card>,
}

impl PreparedRecord {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Returns the card for `tier`, if one was emitted.
    #[must_use]
    pub fn card(&self, tier: Tier) -> Option<&Card> {
        self.cards.iter().find(|card| card.tier == tier)
    }

    /// Tiers present, in emission order.
    #[must_use]
    pub fn tiers(&self) -> Vec<Tier> {
        self.cards.iter().map(|card| card.tier).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
