//! Card builder: one card per non-empty tier, in a fixed order.
//!
//! For each record the three tier operations run concurrently. Signing and
//! encryption are CPU-bound and run on blocking worker threads; the
//! clear-text tier needs no crypto and is built inline. Results are joined
//! and emitted as encrypted-and-signed, signed, clear-text regardless of
//! completion order.

use std::fmt;
use std::sync::Arc;

use contactseal_crypto::{CardCipher, CryptoResult, KeyPair, PrivateKey, PublicKey, SealingCipher};
use contactseal_types::{AttributeEntry, Card, PreparedRecord, Tier};
use contactseal_vcard::{normalize, serialize};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, warn};

use crate::classification::FieldClassification;
use crate::config::CardConfig;
use crate::error::{BatchError, CardError, CardResult};
use crate::identity::with_default_identity;
use crate::partition::{partition, Partition};

/// Read-only key material shared by every tier task of a call.
#[derive(Clone)]
struct KeyRing {
    signing: Arc<[PrivateKey]>,
    encryption: Arc<[PublicKey]>,
}

impl KeyRing {
    fn new(signing: &[PrivateKey], encryption: &[PublicKey]) -> Self {
        Self {
            signing: Arc::from(signing),
            encryption: Arc::from(encryption),
        }
    }

    fn for_pair(key_pair: &KeyPair) -> Self {
        Self::new(
            std::slice::from_ref(&key_pair.private_key),
            std::slice::from_ref(&key_pair.public_key),
        )
    }
}

/// Builds cards for contact records.
///
/// Holds the classification tables, the cipher and the configuration;
/// all are immutable and shared by concurrent calls.
pub struct CardBuilder {
    classification: Arc<FieldClassification>,
    cipher: Arc<dyn CardCipher>,
    config: CardConfig,
}

impl CardBuilder {
    pub fn new(
        classification: impl Into<Arc<FieldClassification>>,
        cipher: Arc<dyn CardCipher>,
        config: CardConfig,
    ) -> Self {
        Self {
            classification: classification.into(),
            cipher,
            config,
        }
    }

    pub fn classification(&self) -> &FieldClassification {
        &self.classification
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Partitions `entries` and builds one card per non-empty tier.
    ///
    /// Entries are expected to be normalized already. Any tier failure
    /// fails the whole call; no partial card list is returned.
    pub async fn build_cards(
        &self,
        entries: &[AttributeEntry],
        signing_keys: &[PrivateKey],
        encryption_keys: &[PublicKey],
    ) -> CardResult<Vec<Card>> {
        let keys = KeyRing::new(signing_keys, encryption_keys);
        self.build_with(entries, &keys).await
    }

    /// Batch form of [`build_cards`](Self::build_cards). Output order
    /// matches input order; the first failing record fails the batch.
    pub async fn build_cards_for_many(
        &self,
        records: Vec<Vec<AttributeEntry>>,
        signing_keys: &[PrivateKey],
        encryption_keys: &[PublicKey],
    ) -> Result<Vec<Vec<Card>>, BatchError> {
        let keys = KeyRing::new(signing_keys, encryption_keys);
        self.run_batch(records, &keys, false).await
    }

    /// Normalizes raw entries and builds the record's cards with one
    /// signing and one encryption key.
    pub async fn prepare_record(
        &self,
        entries: impl IntoIterator<Item = AttributeEntry>,
        key_pair: &KeyPair,
    ) -> CardResult<PreparedRecord> {
        let keys = KeyRing::for_pair(key_pair);
        let normalized = normalize(entries);
        let cards = self.build_with(&normalized, &keys).await?;
        Ok(PreparedRecord::new(cards))
    }

    /// Prepares many records, at most
    /// [`max_concurrent_records`](CardConfig::max_concurrent_records) at a
    /// time. All records succeed or the call fails.
    pub async fn prepare_records(
        &self,
        records: impl IntoIterator<Item = Vec<AttributeEntry>>,
        key_pair: &KeyPair,
    ) -> Result<Vec<PreparedRecord>, BatchError> {
        let keys = KeyRing::for_pair(key_pair);
        let records: Vec<_> = records.into_iter().collect();
        let prepared = self.run_batch(records, &keys, true).await?;
        Ok(prepared.into_iter().map(PreparedRecord::new).collect())
    }

    async fn run_batch(
        &self,
        records: Vec<Vec<AttributeEntry>>,
        keys: &KeyRing,
        normalize_first: bool,
    ) -> Result<Vec<Vec<Card>>, BatchError> {
        let total = records.len();
        let limit = self.config.concurrency_limit();
        info!("Preparing {} records (concurrency {})", total, limit);

        let result = stream::iter(records.into_iter().enumerate())
            .map(|(index, entries)| async move {
                let entries = if normalize_first {
                    normalize(entries)
                } else {
                    entries
                };
                self.build_with(&entries, keys)
                    .await
                    .map_err(|source| BatchError::Record { index, source })
            })
            .buffered(limit)
            .try_collect::<Vec<_>>()
            .await;

        match &result {
            Ok(_) => info!("Prepared {} records", total),
            Err(e) => warn!("Batch of {} records failed: {}", total, e),
        }
        result
    }

    async fn build_with(&self, entries: &[AttributeEntry], keys: &KeyRing) -> CardResult<Vec<Card>> {
        let Partition {
            to_encrypt_and_sign,
            to_sign,
            to_clear_text,
        } = partition(entries, &self.classification);
        debug!(
            "Partitioned {} entries: {} encrypted, {} signed, {} clear",
            entries.len(),
            to_encrypt_and_sign.len(),
            to_sign.len(),
            to_clear_text.len()
        );

        let (sealed, signed, clear) = tokio::try_join!(
            self.encrypted_card(to_encrypt_and_sign, keys),
            self.signed_card(to_sign, keys),
            async { clear_text_card(&to_clear_text) },
        )?;

        let cards: Vec<Card> = [sealed, signed, clear].into_iter().flatten().collect();
        debug!("Built {} cards", cards.len());
        Ok(cards)
    }

    async fn encrypted_card(
        &self,
        bucket: Vec<AttributeEntry>,
        keys: &KeyRing,
    ) -> CardResult<Option<Card>> {
        if bucket.is_empty() {
            return Ok(None);
        }
        let tier = Tier::EncryptedAndSigned;
        let text = serialize(&bucket).map_err(|source| CardError::Serialization { tier, source })?;

        let cipher = Arc::clone(&self.cipher);
        let keys = keys.clone();
        let sealed = run_blocking(tier, move || {
            cipher.encrypt_and_sign(&text, &keys.signing, &keys.encryption)
        })
        .await?;
        Ok(Some(Card::encrypted_and_signed(sealed.data, sealed.signature)))
    }

    async fn signed_card(&self, bucket: Vec<AttributeEntry>, keys: &KeyRing) -> CardResult<Option<Card>> {
        if bucket.is_empty() {
            return Ok(None);
        }
        let tier = Tier::Signed;
        let bucket = with_default_identity(&bucket, &self.config.default_display_name);
        let text = serialize(&bucket).map_err(|source| CardError::Serialization { tier, source })?;

        let cipher = Arc::clone(&self.cipher);
        let signing = Arc::clone(&keys.signing);
        let (text, signature) = run_blocking(tier, move || {
            let signature = cipher.sign(&text, &signing)?;
            Ok((text, signature))
        })
        .await?;
        Ok(Some(Card::signed(text, signature)))
    }
}

impl Default for CardBuilder {
    /// Production tables, [`SealingCipher`] and the default configuration.
    fn default() -> Self {
        Self::new(
            FieldClassification::default(),
            Arc::new(SealingCipher),
            CardConfig::default(),
        )
    }
}

impl fmt::Debug for CardBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardBuilder")
            .field("classification", &self.classification)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn clear_text_card(bucket: &[AttributeEntry]) -> CardResult<Option<Card>> {
    if bucket.is_empty() {
        return Ok(None);
    }
    let text = serialize(bucket).map_err(|source| CardError::Serialization {
        tier: Tier::ClearText,
        source,
    })?;
    Ok(Some(Card::clear_text(text)))
}

/// Runs a crypto call on the blocking pool, tagging failures with `tier`.
async fn run_blocking<T, F>(tier: Tier, f: F) -> CardResult<T>
where
    F: FnOnce() -> CryptoResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(|source| CardError::Crypto { tier, source }),
        Err(e) => {
            warn!("spawn_blocking panicked for {} tier: {}", tier, e);
            Err(CardError::Task {
                tier,
                message: e.to_string(),
            })
        }
    }
}
