//! Multi-recipient encrypted messages.
//!
//! # Process
//! 1. Generate a random content key
//! 2. Encrypt the plaintext with the content key
//! 3. For each recipient, wrap the content key in an X25519 box opened by
//!    an ephemeral secret and the recipient's encryption key
//!
//! Any one recipient's private key recovers the content key.

use crypto_box::aead::{generic_array::GenericArray, Aead};
use crypto_box::SalsaBox;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::cipher::{self, ContentKey, EncryptedPayload};
use crate::error::{CryptoError, CryptoResult};
use crate::key::{PrivateKey, PublicKey, SECRET_KEY_SIZE};
use crate::FORMAT_VERSION;

/// Size of the X25519 box nonce in bytes (XSalsa20).
pub const BOX_NONCE_SIZE: usize = 24;

/// The content key wrapped for one recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedKey {
    /// Fingerprint of the recipient's public key.
    pub recipient: String,
    #[serde(with = "crate::armor::base64_bytes")]
    pub ephemeral: Vec<u8>,
    #[serde(with = "crate::armor::base64_bytes")]
    pub nonce: Vec<u8>,
    #[serde(with = "crate::armor::base64_bytes")]
    pub wrapped: Vec<u8>,
}

/// An encrypted message with one wrapped content key per recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedMessage {
    pub version: u8,
    pub recipients: Vec<WrappedKey>,
    pub payload: EncryptedPayload,
}

impl EncryptedMessage {
    /// Encrypts `plaintext` so that any of `recipients` can read it.
    pub fn seal(plaintext: &[u8], recipients: &[PublicKey]) -> CryptoResult<Self> {
        if recipients.is_empty() {
            return Err(CryptoError::NoKeys("encryption"));
        }

        let content_key = ContentKey::generate();
        let payload = cipher::encrypt(&content_key, plaintext)?;
        let recipients = recipients
            .iter()
            .map(|recipient| wrap_key(&content_key, recipient))
            .collect::<CryptoResult<Vec<_>>>()?;

        Ok(Self {
            version: FORMAT_VERSION,
            recipients,
            payload,
        })
    }

    /// Decrypts the message with one recipient's private key.
    pub fn open(&self, key: &PrivateKey) -> CryptoResult<Vec<u8>> {
        if self.version != FORMAT_VERSION {
            return Err(CryptoError::Armor(format!(
                "unsupported message version {}",
                self.version
            )));
        }

        let fingerprint = key.public_key().fingerprint();
        let wrapped = self
            .recipients
            .iter()
            .find(|w| w.recipient == fingerprint)
            .ok_or_else(|| {
                CryptoError::Decryption(format!("message is not addressed to key {fingerprint}"))
            })?;

        let content_key = unwrap_key(wrapped, key)?;
        cipher::decrypt(&content_key, &self.payload)
    }

    /// Fingerprints of the keys this message is addressed to.
    pub fn recipient_fingerprints(&self) -> impl Iterator<Item = &str> {
        self.recipients.iter().map(|w| w.recipient.as_str())
    }
}

fn wrap_key(content_key: &ContentKey, recipient: &PublicKey) -> CryptoResult<WrappedKey> {
    if !recipient.can_encrypt() {
        return Err(CryptoError::InvalidKey(format!(
            "key {} cannot be used for encryption",
            recipient.fingerprint()
        )));
    }

    let mut secret = [0u8; SECRET_KEY_SIZE];
    OsRng.fill_bytes(&mut secret);
    let ephemeral = crypto_box::SecretKey::from(secret);
    secret.zeroize();

    let mut nonce = [0u8; BOX_NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let sealed_box = SalsaBox::new(recipient.encryption_key(), &ephemeral);
    let wrapped = sealed_box
        .encrypt(GenericArray::from_slice(&nonce), content_key.as_bytes().as_slice())
        .map_err(|e| CryptoError::Encryption(format!("key wrap: {e}")))?;

    Ok(WrappedKey {
        recipient: recipient.fingerprint(),
        ephemeral: ephemeral.public_key().as_bytes().to_vec(),
        nonce: nonce.to_vec(),
        wrapped,
    })
}

fn unwrap_key(wrapped: &WrappedKey, key: &PrivateKey) -> CryptoResult<ContentKey> {
    let ephemeral: [u8; SECRET_KEY_SIZE] =
        wrapped
            .ephemeral
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: SECRET_KEY_SIZE,
                actual: wrapped.ephemeral.len(),
            })?;
    if wrapped.nonce.len() != BOX_NONCE_SIZE {
        return Err(CryptoError::InvalidNonceLength {
            expected: BOX_NONCE_SIZE,
            actual: wrapped.nonce.len(),
        });
    }

    let sealed_box = SalsaBox::new(&crypto_box::PublicKey::from(ephemeral), key.decryption_key());
    let mut bytes = sealed_box
        .decrypt(GenericArray::from_slice(&wrapped.nonce), wrapped.wrapped.as_slice())
        .map_err(|_| CryptoError::Decryption("content key unwrap failed".to_string()))?;
    let content_key = ContentKey::from_slice(&bytes);
    bytes.zeroize();
    content_key
}
