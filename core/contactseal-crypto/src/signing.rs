//! Ed25519 detached signatures.

use ed25519_dalek::{Signature, Signer as _, Verifier as _};
use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, CryptoResult};
use crate::key::{PrivateKey, PublicKey};
use crate::FORMAT_VERSION;

/// One signer's signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePacket {
    /// Fingerprint of the signing key's public half.
    pub signer: String,
    /// Raw 64-byte Ed25519 signature.
    #[serde(with = "crate::armor::base64_bytes")]
    pub signature: Vec<u8>,
}

/// Signatures over a message by one or more keys, stored apart from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetachedSignature {
    pub version: u8,
    pub signatures: Vec<SignaturePacket>,
}

impl DetachedSignature {
    /// Signs `message` with every key in `keys`.
    pub fn create(message: &[u8], keys: &[PrivateKey]) -> CryptoResult<Self> {
        if keys.is_empty() {
            return Err(CryptoError::NoKeys("signing"));
        }

        let signatures = keys
            .iter()
            .map(|key| {
                let signature = key
                    .signing_key()
                    .try_sign(message)
                    .map_err(|e| CryptoError::Signing(e.to_string()))?;
                Ok(SignaturePacket {
                    signer: key.public_key().fingerprint(),
                    signature: signature.to_bytes().to_vec(),
                })
            })
            .collect::<CryptoResult<Vec<_>>>()?;

        Ok(Self {
            version: FORMAT_VERSION,
            signatures,
        })
    }

    /// Succeeds if at least one packet verifies under a key whose
    /// fingerprint matches its signer.
    pub fn verify(&self, message: &[u8], keys: &[PublicKey]) -> CryptoResult<()> {
        if keys.is_empty() {
            return Err(CryptoError::NoKeys("verification"));
        }
        if self.version != FORMAT_VERSION {
            return Err(CryptoError::Armor(format!(
                "unsupported signature version {}",
                self.version
            )));
        }

        let verified = self.signatures.iter().any(|packet| {
            let Ok(signature) = Signature::from_slice(&packet.signature) else {
                return false;
            };
            keys.iter()
                .filter(|key| key.fingerprint() == packet.signer)
                .any(|key| key.verifying_key().verify(message, &signature).is_ok())
        });

        if verified {
            Ok(())
        } else {
            Err(CryptoError::SignatureInvalid)
        }
    }

    /// Fingerprints of the keys that produced this signature.
    pub fn signers(&self) -> impl Iterator<Item = &str> {
        self.signatures.iter().map(|p| p.signer.as_str())
    }
}
