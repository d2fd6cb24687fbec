//! Cryptographic primitives for contactseal cards.
//!
//! - [`sign_detached`] / [`verify_detached`]: Ed25519 signatures over the
//!   exact vCard text, one per signing key
//! - [`encrypt_and_sign`] / [`decrypt`]: hybrid encryption. A random
//!   content key encrypts the text (ChaCha20-Poly1305) and is wrapped for
//!   each recipient with an X25519 box
//! - [`CardCipher`]: the seam the card builder calls through
//!
//! All outputs are armored (base64 of a versioned JSON structure) so cards
//! can carry them as strings.

pub mod armor;
mod card_cipher;
pub mod cipher;
mod error;
mod key;
pub mod message;
pub mod signing;

pub use card_cipher::{
    decrypt, encrypt_and_sign, sign_detached, verify_detached, CardCipher, SealedText,
    SealingCipher,
};
pub use cipher::{ContentKey, EncryptedPayload, KEY_SIZE, NONCE_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{KeyPair, PrivateKey, PublicKey, FINGERPRINT_SIZE, SECRET_KEY_SIZE};
pub use message::EncryptedMessage;
pub use signing::DetachedSignature;

/// Version tag written into every armored structure.
pub const FORMAT_VERSION: u8 = 1;
