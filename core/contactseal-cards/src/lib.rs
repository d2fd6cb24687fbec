//! Card pipeline for contactseal.
//!
//! Turns a contact's attribute entries into the cards stored on the server:
//!
//! 1. [`partition`] splits normalized entries into the encrypted-and-signed,
//!    signed and clear-text tiers using a [`FieldClassification`]
//! 2. [`with_default_identity`] gives the signed tier a `uid` and `fn`
//! 3. [`CardBuilder`] serializes each non-empty tier, signs or encrypts it,
//!    and emits the cards in a fixed order
//!
//! [`open_record`] reverses the process for display and export.

mod builder;
mod classification;
mod config;
mod error;
mod identity;
mod partition;
mod reader;

pub use builder::CardBuilder;
pub use classification::FieldClassification;
pub use config::{CardConfig, DEFAULT_DISPLAY_NAME, DEFAULT_MAX_CONCURRENT_RECORDS};
pub use error::{BatchError, CardError, CardResult};
pub use identity::with_default_identity;
pub use partition::{partition, Partition};
pub use reader::{export_vcard, open_record, CardIssue, OpenedRecord};
