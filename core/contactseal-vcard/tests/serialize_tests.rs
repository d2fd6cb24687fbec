use contactseal_types::AttributeEntry;
use contactseal_vcard::{serialize, VcardError, MAX_LINE_OCTETS};
use pretty_assertions::assert_eq;

#[test]
fn empty_list_is_bare_card() {
    let text = serialize(&[]).unwrap();
    assert_eq!(text, "BEGIN:VCARD\r\nVERSION:4.0\r\nEND:VCARD\r\n");
}

#[test]
fn content_lines_follow_input_order() {
    let entries = vec![
        AttributeEntry::new("fn", "Alice").with_preference(1),
        AttributeEntry::new("email", "a@example.com")
            .with_group("item1")
            .with_kind("work")
            .with_preference(1),
    ];
    let text = serialize(&entries).unwrap();
    assert_eq!(
        text,
        "BEGIN:VCARD\r\n\
         VERSION:4.0\r\n\
         FN;PREF=1:Alice\r\n\
         item1.EMAIL;TYPE=work;PREF=1:a@example.com\r\n\
         END:VCARD\r\n"
    );
}

#[test]
fn version_entry_is_written_once_and_first() {
    let entries = vec![
        AttributeEntry::new("fn", "Alice"),
        AttributeEntry::new("version", "4.0"),
    ];
    let text = serialize(&entries).unwrap();
    assert_eq!(text.matches("VERSION").count(), 1);
    assert!(text.starts_with("BEGIN:VCARD\r\nVERSION:4.0\r\nFN:Alice"));
}

#[test]
fn structured_values_are_escaped_per_component() {
    let entries = vec![AttributeEntry::new(
        "adr",
        vec!["", "", "1; Main, St", "Town", "", "", ""],
    )];
    let text = serialize(&entries).unwrap();
    assert!(text.contains(r"ADR:;;1\; Main\, St;Town;;;"));
}

#[test]
fn newlines_are_escaped() {
    let text = serialize(&[AttributeEntry::new("note", "line1\nline2")]).unwrap();
    assert!(text.contains(r"NOTE:line1\nline2"));
}

#[test]
fn long_lines_are_folded() {
    let note = "x".repeat(200);
    let text = serialize(&[AttributeEntry::new("note", note.as_str())]).unwrap();
    for line in text.split("\r\n") {
        assert!(line.len() <= MAX_LINE_OCTETS);
    }
    assert!(text.contains("\r\n x"));
}

#[test]
fn output_is_deterministic() {
    let entries = vec![
        AttributeEntry::new("fn", "Zoë"),
        AttributeEntry::new("categories", "Friends"),
    ];
    assert_eq!(serialize(&entries).unwrap(), serialize(&entries).unwrap());
}

#[test]
fn invalid_field_name_fails() {
    let err = serialize(&[AttributeEntry::new("bad field", "x")]).unwrap_err();
    assert_eq!(err, VcardError::InvalidFieldName("bad field".into()));
}

#[test]
fn invalid_group_fails() {
    let err = serialize(&[AttributeEntry::new("tel", "1").with_group("a.b")]).unwrap_err();
    assert!(matches!(err, VcardError::InvalidGroup { .. }));
}

#[test]
fn invalid_type_parameter_fails() {
    let err = serialize(&[AttributeEntry::new("tel", "1").with_kind("a:b")]).unwrap_err();
    assert!(matches!(err, VcardError::InvalidParameter { param: "TYPE", .. }));
}
