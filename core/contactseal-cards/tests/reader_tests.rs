mod common;

use common::{entry, owner, stranger};
use contactseal_cards::{export_vcard, open_record, CardBuilder, CardIssue};
use contactseal_types::{AttributeEntry, PreparedRecord, Tier};
use pretty_assertions::assert_eq;

async fn prepared() -> PreparedRecord {
    let raw = vec![
        entry("fn", "Alice"),
        entry("email", "alice@example.com"),
        entry("categories", "Friends"),
        entry("note", "likes tea"),
    ];
    CardBuilder::default().prepare_record(raw, &owner()).await.unwrap()
}

fn values<'a>(entries: &'a [AttributeEntry], field: &str) -> Vec<&'a str> {
    entries
        .iter()
        .filter(|e| e.is(field))
        .filter_map(|e| e.value.as_single())
        .collect()
}

#[tokio::test]
async fn opens_all_cards() {
    let record = prepared().await;
    assert_eq!(record.len(), 3);

    let opened = open_record(&record, &owner());

    assert!(opened.is_intact(), "{:?}", opened.issues);
    assert_eq!(values(&opened.entries, "fn"), vec!["Alice"]);
    assert_eq!(values(&opened.entries, "email"), vec!["alice@example.com"]);
    assert_eq!(values(&opened.entries, "categories"), vec!["Friends"]);
    assert_eq!(values(&opened.entries, "note"), vec!["likes tea"]);
    assert_eq!(values(&opened.entries, "uid").len(), 1);
    assert_eq!(values(&opened.entries, "version"), vec!["4.0"]);
}

#[tokio::test]
async fn merges_encrypted_entries_first() {
    let mut record = prepared().await;
    record.cards.reverse();

    let opened = open_record(&record, &owner());

    assert!(opened.entries[0].is("version"));
    assert!(opened.entries[1].is("note"));
}

#[tokio::test]
async fn tampered_signed_card_is_reported_but_readable() {
    let mut record = prepared().await;
    let signed = record
        .cards
        .iter_mut()
        .find(|card| card.tier == Tier::Signed)
        .unwrap();
    let text = signed.data.take().unwrap();
    signed.data = Some(text.replace("Alice", "Mallory"));

    let opened = open_record(&record, &owner());

    assert_eq!(opened.issues, vec![CardIssue::SignatureInvalid { tier: Tier::Signed }]);
    assert_eq!(values(&opened.entries, "fn"), vec!["Mallory"]);
}

#[tokio::test]
async fn missing_signature_is_reported() {
    let mut record = prepared().await;
    for card in &mut record.cards {
        if card.tier == Tier::Signed {
            card.signature = None;
        }
    }

    let opened = open_record(&record, &owner());
    assert_eq!(opened.issues, vec![CardIssue::SignatureMissing { tier: Tier::Signed }]);
}

#[tokio::test]
async fn wrong_key_cannot_decrypt_or_verify() {
    let record = prepared().await;

    let opened = open_record(&record, &stranger());

    let tiers: Vec<Tier> = opened.issues.iter().map(CardIssue::tier).collect();
    assert_eq!(tiers, vec![Tier::EncryptedAndSigned, Tier::Signed]);
    assert!(matches!(opened.issues[0], CardIssue::DecryptionFailed { .. }));
    assert!(matches!(opened.issues[1], CardIssue::SignatureInvalid { .. }));
    // Plain tiers remain readable.
    assert_eq!(values(&opened.entries, "categories"), vec!["Friends"]);
    assert!(values(&opened.entries, "note").is_empty());
}

#[tokio::test]
async fn garbage_card_is_unparseable() {
    let mut record = prepared().await;
    for card in &mut record.cards {
        if card.tier == Tier::ClearText {
            card.data = Some("BEGIN:VCARD\r\nno colon here\r\nEND:VCARD\r\n".to_string());
        }
    }

    let opened = open_record(&record, &owner());
    assert_eq!(opened.issues.len(), 1);
    assert!(matches!(
        opened.issues[0],
        CardIssue::Unparseable {
            tier: Tier::ClearText,
            ..
        }
    ));
}

#[tokio::test]
async fn export_produces_single_vcard() {
    let record = prepared().await;
    let opened = open_record(&record, &owner());

    let vcard = export_vcard(&opened.entries).unwrap();

    assert!(vcard.starts_with("BEGIN:VCARD\r\nVERSION:4.0\r\n"));
    assert!(vcard.ends_with("END:VCARD\r\n"));
    assert_eq!(vcard.matches("VERSION:").count(), 1);
    assert!(vcard.contains("NOTE:likes tea\r\n"));
    assert!(vcard.contains("EMAIL;PREF=1:alice@example.com\r\n"));
}

#[tokio::test]
async fn prepared_record_uses_transport_names() {
    let record = prepared().await;
    let json = serde_json::to_value(&record).unwrap();

    let cards = json["Cards"].as_array().unwrap();
    let codes: Vec<u64> = cards.iter().map(|c| c["Type"].as_u64().unwrap()).collect();
    assert_eq!(codes, vec![3, 2, 0]);
    assert!(cards[2]["Signature"].is_null());

    let restored: PreparedRecord = serde_json::from_value(json).unwrap();
    assert_eq!(restored, record);
}
