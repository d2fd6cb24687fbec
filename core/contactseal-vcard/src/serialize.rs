//! Canonical vCard writer.
//!
//! Output is byte-stable for a given entry list: detached signatures are
//! computed over it and verified against the stored text.

use contactseal_types::{fields, AttributeEntry, PropertyValue};

use crate::error::{VcardError, VcardResult};
use crate::escape::{escape_text, fold_line, is_token};

/// Maximum octets per physical line before folding.
pub const MAX_LINE_OCTETS: usize = 75;

const DEFAULT_VERSION: &str = "4.0";

/// Serializes entries into a single vCard.
///
/// One `VERSION` line is always written first: the value of the first
/// `version` entry, or `4.0`. All other entries follow in input order.
pub fn serialize(entries: &[AttributeEntry]) -> VcardResult<String> {
    let mut out = String::with_capacity(64 + entries.len() * 48);
    out.push_str("BEGIN:VCARD\r\n");

    let version = entries
        .iter()
        .find(|entry| is_version(entry))
        .map(|entry| render_value(&entry.value))
        .unwrap_or_else(|| DEFAULT_VERSION.to_string());
    fold_line(&format!("VERSION:{version}"), MAX_LINE_OCTETS, &mut out);

    for entry in entries.iter().filter(|entry| !is_version(entry)) {
        let line = content_line(entry)?;
        fold_line(&line, MAX_LINE_OCTETS, &mut out);
    }

    out.push_str("END:VCARD\r\n");
    Ok(out)
}

fn is_version(entry: &AttributeEntry) -> bool {
    entry.field.as_str().eq_ignore_ascii_case(fields::VERSION)
}

fn content_line(entry: &AttributeEntry) -> VcardResult<String> {
    let name = entry.field.as_str();
    if !is_token(name) {
        return Err(VcardError::InvalidFieldName(name.to_string()));
    }

    let mut line = String::new();
    if let Some(group) = &entry.group {
        if !is_token(group) {
            return Err(VcardError::InvalidGroup {
                field: name.to_string(),
                group: group.clone(),
            });
        }
        line.push_str(group);
        line.push('.');
    }
    line.push_str(&name.to_ascii_uppercase());

    if let Some(kind) = &entry.kind {
        if !is_param_safe(kind) {
            return Err(VcardError::InvalidParameter {
                field: name.to_string(),
                param: "TYPE",
                value: kind.clone(),
            });
        }
        line.push_str(";TYPE=");
        line.push_str(kind);
    }
    if let Some(pref) = entry.preference {
        line.push_str(";PREF=");
        line.push_str(&pref.to_string());
    }

    line.push(':');
    line.push_str(&render_value(&entry.value));
    Ok(line)
}

fn render_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Single(text) => escape_text(text),
        PropertyValue::Multiple(parts) => parts
            .iter()
            .map(|part| escape_text(part))
            .collect::<Vec<_>>()
            .join(";"),
    }
}

fn is_param_safe(value: &str) -> bool {
    !value.is_empty()
        && !value
            .chars()
            .any(|c| matches!(c, ':' | ';' | '"') || c.is_control())
}
