//! Core type definitions for contactseal.
//!
//! This crate defines the plain data shared by every stage of the card
//! pipeline:
//! - Attribute entries (field, value, group, type, preference)
//! - Trust tiers and the cards produced for them
//! - Contact unique identifiers (UUID v4 URNs)
//!
//! Nothing here performs I/O or cryptography.

mod card;
mod entry;
pub mod fields;
mod ids;

pub use card::{Card, PreparedRecord, Tier};
pub use entry::{AttributeEntry, FieldName, PropertyValue};
pub use ids::ContactUid;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("unknown card type code: {0}")]
    UnknownTier(u8),
}
