//! Text armor for signatures and encrypted messages.
//!
//! Armored text is standard base64 of the structure's JSON encoding.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CryptoError, CryptoResult};

/// Encodes a structure as armored text.
pub fn armor<T: Serialize>(value: &T) -> CryptoResult<String> {
    let json = serde_json::to_vec(value)?;
    Ok(STANDARD.encode(json))
}

/// Decodes armored text produced by [`armor`].
pub fn dearmor<T: DeserializeOwned>(text: &str) -> CryptoResult<T> {
    let json = STANDARD
        .decode(text.trim())
        .map_err(|e| CryptoError::Armor(format!("invalid base64: {e}")))?;
    Ok(serde_json::from_slice(&json)?)
}

/// Serde adapter storing byte vectors as base64 strings.
pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}
