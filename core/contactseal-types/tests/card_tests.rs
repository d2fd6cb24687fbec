use contactseal_types::{Card, PreparedRecord, Tier};
use pretty_assertions::assert_eq;

#[test]
fn tier_codes() {
    assert_eq!(Tier::ClearText.code(), 0);
    assert_eq!(Tier::Signed.code(), 2);
    assert_eq!(Tier::EncryptedAndSigned.code(), 3);
}

#[test]
fn tier_from_code_rejects_reserved_and_unknown() {
    assert!(Tier::from_code(1).is_err());
    assert!(Tier::from_code(9).is_err());
    assert_eq!(Tier::from_code(2).unwrap(), Tier::Signed);
}

#[test]
fn tier_signedness() {
    assert!(!Tier::ClearText.is_signed());
    assert!(Tier::Signed.is_signed());
    assert!(Tier::EncryptedAndSigned.is_signed());
}

#[test]
fn clear_text_card_has_no_signature() {
    let card = Card::clear_text("BEGIN:VCARD\r\n".into());
    assert_eq!(card.tier, Tier::ClearText);
    assert!(card.signature.is_none());
}

#[test]
fn card_transport_json() {
    let card = Card::signed("DATA".into(), "SIG".into());
    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "Type": 2, "Data": "DATA", "Signature": "SIG" })
    );
}

#[test]
fn clear_text_card_serializes_null_signature() {
    let json = serde_json::to_value(Card::clear_text("DATA".into())).unwrap();
    assert_eq!(json["Signature"], serde_json::Value::Null);
    assert_eq!(json["Type"], 0);
}

#[test]
fn card_rejects_unknown_type() {
    let json = r#"{"Type":1,"Data":"x","Signature":null}"#;
    assert!(serde_json::from_str::<Card>(json).is_err());
}

#[test]
fn prepared_record_lookup() {
    let record = PreparedRecord::new(vec![
        Card::encrypted_and_signed("C".into(), "S1".into()),
        Card::clear_text("P".into()),
    ]);
    assert_eq!(record.len(), 2);
    assert_eq!(record.tiers(), vec![Tier::EncryptedAndSigned, Tier::ClearText]);
    assert!(record.card(Tier::Signed).is_none());
    assert_eq!(record.card(Tier::ClearText).unwrap().data.as_deref(), Some("P"));
}

#[test]
fn prepared_record_json_uses_cards_key() {
    let record = PreparedRecord::new(vec![Card::clear_text("P".into())]);
    let json = serde_json::to_string(&record).unwrap();
    assert!(json.starts_with(r#"{"Cards":["#));
    let back: PreparedRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}
