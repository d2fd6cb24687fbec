//! Contact key pairs.
//!
//! A contact key bundles two halves: an Ed25519 key for detached
//! signatures and an X25519 key for receiving wrapped content keys.

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::{CryptoError, CryptoResult};

/// Size of each secret or public half in bytes.
pub const SECRET_KEY_SIZE: usize = 32;

/// Number of SHA-256 bytes kept in a public key fingerprint.
pub const FINGERPRINT_SIZE: usize = 8;

/// X25519 u-coordinates of order 1, 2, 4 or 8, plus the non-canonical
/// encodings p - 1, p and p + 1.
const SMALL_ORDER_POINTS: [[u8; SECRET_KEY_SIZE]; 7] = [
    [0; SECRET_KEY_SIZE],
    low_byte(1),
    [
        0xe0, 0xeb, 0x7a, 0x7c, 0x3b, 0x41, 0xb8, 0xae, 0x16, 0x56, 0xe3, 0xfa, 0xf1, 0x9f, 0xc4,
        0x6a, 0xda, 0x09, 0x8d, 0xeb, 0x9c, 0x32, 0xb1, 0xfd, 0x86, 0x62, 0x05, 0x16, 0x5f, 0x49,
        0xb8, 0x00,
    ],
    [
        0x5f, 0x9c, 0x95, 0xbc, 0xa3, 0x50, 0x8c, 0x24, 0xb1, 0xd0, 0xb1, 0x55, 0x9c, 0x83, 0xef,
        0x5b, 0x04, 0x44, 0x5c, 0xc4, 0x58, 0x1c, 0x8e, 0x86, 0xd8, 0x22, 0x4e, 0xdd, 0xd0, 0x9f,
        0x11, 0x57,
    ],
    field_prime_offset(0xec),
    field_prime_offset(0xed),
    field_prime_offset(0xee),
];

const fn low_byte(low: u8) -> [u8; SECRET_KEY_SIZE] {
    let mut bytes = [0; SECRET_KEY_SIZE];
    bytes[0] = low;
    bytes
}

/// Little-endian `0x7fff..ff<low>`: p - 1, p and p + 1 for `0xec`..`0xee`.
const fn field_prime_offset(low: u8) -> [u8; SECRET_KEY_SIZE] {
    let mut bytes = [0xff; SECRET_KEY_SIZE];
    bytes[0] = low;
    bytes[SECRET_KEY_SIZE - 1] = 0x7f;
    bytes
}

const SIGNING_DOMAIN: &[u8] = b"contactseal/v1/signing";
const ENCRYPTION_DOMAIN: &[u8] = b"contactseal/v1/encryption";

/// Private half of a contact key: signs cards and unwraps content keys.
///
/// Both halves zeroize on drop.
#[derive(Clone)]
pub struct PrivateKey {
    signing: SigningKey,
    decryption: crypto_box::SecretKey,
}

impl PrivateKey {
    /// Creates a private key from its raw halves (signing seed, then X25519 secret).
    pub fn from_bytes(bytes: &[u8; 2 * SECRET_KEY_SIZE]) -> Self {
        let mut signing = [0u8; SECRET_KEY_SIZE];
        let mut decryption = [0u8; SECRET_KEY_SIZE];
        signing.copy_from_slice(&bytes[..SECRET_KEY_SIZE]);
        decryption.copy_from_slice(&bytes[SECRET_KEY_SIZE..]);

        let key = Self {
            signing: SigningKey::from_bytes(&signing),
            decryption: crypto_box::SecretKey::from(decryption),
        };
        signing.zeroize();
        decryption.zeroize();
        key
    }

    /// Returns the raw halves. The caller is responsible for zeroizing them.
    pub fn to_bytes(&self) -> [u8; 2 * SECRET_KEY_SIZE] {
        let mut out = [0u8; 2 * SECRET_KEY_SIZE];
        out[..SECRET_KEY_SIZE].copy_from_slice(&self.signing.to_bytes());
        out[SECRET_KEY_SIZE..].copy_from_slice(&self.decryption.to_bytes());
        out
    }

    /// Returns the corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying: self.signing.verifying_key(),
            encryption: self.decryption.public_key(),
        }
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing
    }

    pub(crate) fn decryption_key(&self) -> &crypto_box::SecretKey {
        &self.decryption
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("fingerprint", &self.public_key().fingerprint())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Public half of a contact key: verifies signatures and wraps content keys.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    verifying: VerifyingKey,
    encryption: crypto_box::PublicKey,
}

impl PublicKey {
    /// Creates a public key from its raw halves (Ed25519, then X25519).
    pub fn from_bytes(bytes: &[u8; 2 * SECRET_KEY_SIZE]) -> CryptoResult<Self> {
        let mut verifying = [0u8; SECRET_KEY_SIZE];
        let mut encryption = [0u8; SECRET_KEY_SIZE];
        verifying.copy_from_slice(&bytes[..SECRET_KEY_SIZE]);
        encryption.copy_from_slice(&bytes[SECRET_KEY_SIZE..]);

        let verifying = VerifyingKey::from_bytes(&verifying)
            .map_err(|e| CryptoError::InvalidKey(format!("ed25519 public key: {e}")))?;
        Ok(Self {
            verifying,
            encryption: crypto_box::PublicKey::from(encryption),
        })
    }

    /// Returns the raw halves.
    pub fn to_bytes(&self) -> [u8; 2 * SECRET_KEY_SIZE] {
        let mut out = [0u8; 2 * SECRET_KEY_SIZE];
        out[..SECRET_KEY_SIZE].copy_from_slice(self.verifying.as_bytes());
        out[SECRET_KEY_SIZE..].copy_from_slice(self.encryption.as_bytes());
        out
    }

    /// Short hex identifier: the first [`FINGERPRINT_SIZE`] bytes of
    /// SHA-256 over both public halves.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::new()
            .chain_update(self.verifying.as_bytes())
            .chain_update(self.encryption.as_bytes())
            .finalize();
        hex::encode(&digest[..FINGERPRINT_SIZE])
    }

    /// Whether the encryption half can receive wrapped keys.
    ///
    /// Rejects the small-order X25519 points (and their encodings with the
    /// unused top bit set); each yields a predictable shared secret.
    pub fn can_encrypt(&self) -> bool {
        let mut point = *self.encryption.as_bytes();
        point[SECRET_KEY_SIZE - 1] &= 0x7f;
        !SMALL_ORDER_POINTS.contains(&point)
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying
    }

    pub(crate) fn encryption_key(&self) -> &crypto_box::PublicKey {
        &self.encryption
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// A private key together with its public key.
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generates a new random key pair.
    pub fn generate() -> Self {
        let signing = SigningKey::generate(&mut OsRng);
        let mut secret = [0u8; SECRET_KEY_SIZE];
        OsRng.fill_bytes(&mut secret);
        let decryption = crypto_box::SecretKey::from(secret);
        secret.zeroize();

        Self::from_private(PrivateKey {
            signing,
            decryption,
        })
    }

    /// Derives a key pair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_SIZE]) -> Self {
        let mut bytes = [0u8; 2 * SECRET_KEY_SIZE];
        bytes[..SECRET_KEY_SIZE].copy_from_slice(&domain_hash(SIGNING_DOMAIN, seed));
        bytes[SECRET_KEY_SIZE..].copy_from_slice(&domain_hash(ENCRYPTION_DOMAIN, seed));
        let private_key = PrivateKey::from_bytes(&bytes);
        bytes.zeroize();
        Self::from_private(private_key)
    }

    /// Builds a pair from a private key.
    pub fn from_private(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self {
            private_key,
            public_key,
        }
    }
}

fn domain_hash(domain: &[u8], seed: &[u8]) -> [u8; SECRET_KEY_SIZE] {
    Sha256::new()
        .chain_update(domain)
        .chain_update(seed)
        .finalize()
        .into()
}
