//! Text-level primitives the card builder consumes.
//!
//! The builder depends on `Arc<dyn CardCipher>` and never touches the
//! primitives directly. [`SealingCipher`] is the production implementation.

use crate::armor::{armor, dearmor};
use crate::error::CryptoResult;
use crate::key::{PrivateKey, PublicKey};
use crate::message::EncryptedMessage;
use crate::signing::DetachedSignature;

/// Output of [`encrypt_and_sign`]: armored ciphertext plus an armored
/// detached signature over the plaintext.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedText {
    pub data: String,
    pub signature: String,
}

/// Signing and encryption operations used to build cards.
pub trait CardCipher: Send + Sync {
    /// Detached signature over exactly `text`.
    fn sign(&self, text: &str, signing_keys: &[PrivateKey]) -> CryptoResult<String>;

    /// Encrypts `text` for `encryption_keys` and signs the plaintext.
    fn encrypt_and_sign(
        &self,
        text: &str,
        signing_keys: &[PrivateKey],
        encryption_keys: &[PublicKey],
    ) -> CryptoResult<SealedText>;
}

/// Ed25519 signatures and X25519-wrapped ChaCha20-Poly1305 encryption.
#[derive(Debug, Clone, Copy, Default)]
pub struct SealingCipher;

impl CardCipher for SealingCipher {
    fn sign(&self, text: &str, signing_keys: &[PrivateKey]) -> CryptoResult<String> {
        sign_detached(text, signing_keys)
    }

    fn encrypt_and_sign(
        &self,
        text: &str,
        signing_keys: &[PrivateKey],
        encryption_keys: &[PublicKey],
    ) -> CryptoResult<SealedText> {
        encrypt_and_sign(text, signing_keys, encryption_keys)
    }
}

/// Signs the UTF-8 bytes of `text` with every key, returning armored text.
pub fn sign_detached(text: &str, signing_keys: &[PrivateKey]) -> CryptoResult<String> {
    let signature = DetachedSignature::create(text.as_bytes(), signing_keys)?;
    armor(&signature)
}

/// Checks an armored detached signature against `text`.
pub fn verify_detached(
    text: &str,
    signature: &str,
    verification_keys: &[PublicKey],
) -> CryptoResult<()> {
    let signature: DetachedSignature = dearmor(signature)?;
    signature.verify(text.as_bytes(), verification_keys)
}

/// Encrypts `text` for every encryption key and signs the plaintext with
/// every signing key.
pub fn encrypt_and_sign(
    text: &str,
    signing_keys: &[PrivateKey],
    encryption_keys: &[PublicKey],
) -> CryptoResult<SealedText> {
    let signature = DetachedSignature::create(text.as_bytes(), signing_keys)?;
    let message = EncryptedMessage::seal(text.as_bytes(), encryption_keys)?;
    Ok(SealedText {
        data: armor(&message)?,
        signature: armor(&signature)?,
    })
}

/// Decrypts an armored message back to its text.
pub fn decrypt(data: &str, private_key: &PrivateKey) -> CryptoResult<String> {
    let message: EncryptedMessage = dearmor(data)?;
    let plaintext = message.open(private_key)?;
    String::from_utf8(plaintext)
        .map_err(|e| crate::CryptoError::Decryption(format!("invalid UTF-8: {e}")))
}
