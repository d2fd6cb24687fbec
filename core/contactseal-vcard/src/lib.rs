//! vCard handling for contactseal.
//!
//! - [`normalize`]: canonical, deduplicated, grouped, preference-ordered entries
//! - [`serialize`]: deterministic vCard 4.0 text (signatures are computed over it)
//! - [`parse`]: reads that text back into entries

mod error;
mod escape;
mod normalize;
mod parse;
mod serialize;

pub use error::{ValidationWarning, VcardError, VcardResult};
pub use normalize::{normalize, normalize_with_warnings, Normalized};
pub use parse::parse;
pub use serialize::{serialize, MAX_LINE_OCTETS};
