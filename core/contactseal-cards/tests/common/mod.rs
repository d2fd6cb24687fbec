//! Shared test helpers for card tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use contactseal_cards::{CardBuilder, CardConfig, FieldClassification};
use contactseal_crypto::{
    CardCipher, CryptoError, CryptoResult, KeyPair, PrivateKey, PublicKey, SealedText,
    SealingCipher,
};
use contactseal_types::AttributeEntry;

/// Deterministic key pair for the record owner.
pub fn owner() -> KeyPair {
    let seed: [u8; 32] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ];
    KeyPair::from_seed(&seed)
}

/// A key pair unrelated to [`owner`].
pub fn stranger() -> KeyPair {
    KeyPair::from_seed(&[0xAB; 32])
}

pub fn entry(field: &str, value: &str) -> AttributeEntry {
    AttributeEntry::new(field, value)
}

/// Installs a test-writer subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `ClearEligible = {}`, `SignedEligible = {fn}`.
pub fn fn_only_classification() -> FieldClassification {
    FieldClassification::new(Vec::<&str>::new(), ["fn"])
}

/// `categories` in both tables; `fn` and `uid` signed.
pub fn dual_categories_classification() -> FieldClassification {
    FieldClassification::new(["categories"], ["categories", "fn", "uid"])
}

pub fn builder_with(classification: FieldClassification) -> CardBuilder {
    CardBuilder::new(classification, Arc::new(SealingCipher), CardConfig::default())
}

pub fn builder_with_cipher(cipher: Arc<dyn CardCipher>) -> CardBuilder {
    CardBuilder::new(FieldClassification::default(), cipher, CardConfig::default())
}

/// Signs normally; every encryption fails.
pub struct FailOnEncrypt;

impl CardCipher for FailOnEncrypt {
    fn sign(&self, text: &str, signing_keys: &[PrivateKey]) -> CryptoResult<String> {
        SealingCipher.sign(text, signing_keys)
    }

    fn encrypt_and_sign(
        &self,
        _text: &str,
        _signing_keys: &[PrivateKey],
        _encryption_keys: &[PublicKey],
    ) -> CryptoResult<SealedText> {
        Err(CryptoError::Encryption("recipient key rejected".into()))
    }
}

/// Encrypts normally; every signature fails.
pub struct FailOnSign;

impl CardCipher for FailOnSign {
    fn sign(&self, _text: &str, _signing_keys: &[PrivateKey]) -> CryptoResult<String> {
        Err(CryptoError::Signing("signing key rejected".into()))
    }

    fn encrypt_and_sign(
        &self,
        text: &str,
        signing_keys: &[PrivateKey],
        encryption_keys: &[PublicKey],
    ) -> CryptoResult<SealedText> {
        SealingCipher.encrypt_and_sign(text, signing_keys, encryption_keys)
    }
}

/// Delegates to [`SealingCipher`] and counts calls.
#[derive(Default)]
pub struct CountingCipher {
    pub calls: AtomicUsize,
}

impl CountingCipher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CardCipher for CountingCipher {
    fn sign(&self, text: &str, signing_keys: &[PrivateKey]) -> CryptoResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SealingCipher.sign(text, signing_keys)
    }

    fn encrypt_and_sign(
        &self,
        text: &str,
        signing_keys: &[PrivateKey],
        encryption_keys: &[PublicKey],
    ) -> CryptoResult<SealedText> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SealingCipher.encrypt_and_sign(text, signing_keys, encryption_keys)
    }
}

/// Panics inside every crypto call.
pub struct PanickingCipher;

impl CardCipher for PanickingCipher {
    fn sign(&self, _text: &str, _signing_keys: &[PrivateKey]) -> CryptoResult<String> {
        panic!("signer crashed");
    }

    fn encrypt_and_sign(
        &self,
        _text: &str,
        _signing_keys: &[PrivateKey],
        _encryption_keys: &[PublicKey],
    ) -> CryptoResult<SealedText> {
        panic!("encryptor crashed");
    }
}
