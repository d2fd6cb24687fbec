//! Error types for card building.

use contactseal_crypto::CryptoError;
use contactseal_types::Tier;
use contactseal_vcard::VcardError;
use thiserror::Error;

/// Result type for single-record card operations.
pub type CardResult<T> = Result<T, CardError>;

/// A record failed to build. Every variant names the failing tier.
#[derive(Debug, Error)]
pub enum CardError {
    /// The tier's entries could not be serialized.
    #[error("{tier} tier: serialization failed: {source}")]
    Serialization { tier: Tier, source: VcardError },

    /// Signing or encryption failed.
    #[error("{tier} tier: {source}")]
    Crypto { tier: Tier, source: CryptoError },

    /// The worker task running the tier panicked or was cancelled.
    #[error("{tier} tier: worker task failed: {message}")]
    Task { tier: Tier, message: String },
}

impl CardError {
    /// The tier whose operation failed.
    #[must_use]
    pub fn tier(&self) -> Tier {
        match self {
            Self::Serialization { tier, .. } | Self::Crypto { tier, .. } | Self::Task { tier, .. } => {
                *tier
            }
        }
    }
}

/// A batch failed because one of its records failed.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("record {index}: {source}")]
    Record { index: usize, source: CardError },
}

impl BatchError {
    /// Position of the failing record in the batch.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Record { index, .. } => *index,
        }
    }

    /// Tier that failed within that record.
    #[must_use]
    pub fn tier(&self) -> Tier {
        match self {
            Self::Record { source, .. } => source.tier(),
        }
    }
}
