//! Card builder configuration.

use serde::{Deserialize, Serialize};

/// Placeholder display name used when a record has none.
pub const DEFAULT_DISPLAY_NAME: &str = "Unknown";

/// Records prepared at once by a batch call.
pub const DEFAULT_MAX_CONCURRENT_RECORDS: usize = 8;

/// Localized "Unknown" placeholders, keyed by primary language subtag.
const UNKNOWN_NAMES: &[(&str, &str)] = &[
    ("en", DEFAULT_DISPLAY_NAME),
    ("fr", "Inconnu"),
    ("de", "Unbekannt"),
    ("es", "Desconocido"),
    ("it", "Sconosciuto"),
    ("nl", "Onbekend"),
    ("pt", "Desconhecido"),
];

/// Configuration for [`CardBuilder`](crate::CardBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Display name injected into the signed tier when `fn` is absent.
    pub default_display_name: String,
    /// Upper bound on records built concurrently by a batch call.
    /// Zero is treated as one.
    pub max_concurrent_records: usize,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            default_display_name: DEFAULT_DISPLAY_NAME.to_string(),
            max_concurrent_records: DEFAULT_MAX_CONCURRENT_RECORDS,
        }
    }
}

impl CardConfig {
    /// Default configuration with the placeholder name for a BCP 47
    /// language tag such as `fr` or `pt-BR`. Unknown languages fall back
    /// to English.
    pub fn for_locale(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let name = UNKNOWN_NAMES
            .iter()
            .find(|(code, _)| *code == language)
            .map_or(DEFAULT_DISPLAY_NAME, |(_, name)| *name);

        Self {
            default_display_name: name.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn concurrency_limit(&self) -> usize {
        self.max_concurrent_records.max(1)
    }
}
