use contactseal_types::{ContactUid, Error};
use std::collections::HashSet;
use std::str::FromStr;

#[test]
fn contact_uid_new_is_unique() {
    let a = ContactUid::new();
    let b = ContactUid::new();
    assert_ne!(a, b);
}

#[test]
fn contact_uid_display_is_urn() {
    let uid = ContactUid::new();
    let s = uid.to_string();
    assert!(s.starts_with("urn:uuid:"));
    assert_eq!(s.len(), "urn:uuid:".len() + 36);
}

#[test]
fn contact_uid_display_and_parse() {
    let uid = ContactUid::new();
    let parsed = ContactUid::parse(&uid.to_string()).unwrap();
    assert_eq!(uid, parsed);
}

#[test]
fn contact_uid_parse_without_prefix() {
    let uid = ContactUid::new();
    let parsed = ContactUid::from_str(&uid.as_uuid().to_string()).unwrap();
    assert_eq!(uid, parsed);
}

#[test]
fn contact_uid_parse_invalid() {
    let err = ContactUid::parse("urn:uuid:nope").unwrap_err();
    assert!(matches!(err, Error::InvalidUuid(_)));
    assert!(err.to_string().starts_with("invalid UUID"));
}

#[test]
fn contact_uid_rejects_invalid_json() {
    assert!(serde_json::from_str::<ContactUid>("\"not-a-uid\"").is_err());
}

#[test]
fn contact_uid_many_are_distinct() {
    let ids: HashSet<_> = (0..500).map(|_| ContactUid::new()).collect();
    assert_eq!(ids.len(), 500);
}

#[test]
fn contact_uid_serde_uses_urn_form() {
    let uid = ContactUid::new();
    let json = serde_json::to_string(&uid).unwrap();
    assert_eq!(json, format!("\"{uid}\""));
    let back: ContactUid = serde_json::from_str(&json).unwrap();
    assert_eq!(back, uid);
}
