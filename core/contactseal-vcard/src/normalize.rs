//! Sanitizer/normalizer for raw attribute entries.
//!
//! Produces the canonical entry list the partitioner consumes. Entries
//! that cannot be kept are dropped and reported as [`ValidationWarning`]s;
//! normalization itself never fails.

use std::collections::{HashMap, HashSet};

use contactseal_types::{fields, AttributeEntry, PropertyValue};
use email_address::EmailAddress;
use tracing::debug;

use crate::error::ValidationWarning;

/// Fields holding a list of values that are stored one entry per value.
const LIST_FIELDS: &[&str] = &[fields::CATEGORIES, fields::NICKNAME];

/// Structured fields: (name, component count, component for a bare value).
const STRUCTURED_FIELDS: &[(&str, usize, usize)] =
    &[(fields::N, 5, 0), (fields::ADR, 7, 2), (fields::GENDER, 2, 0)];

/// Fields allowed at most once per record; later entries are duplicates.
const SINGLE_FIELDS: &[&str] = &[fields::UID];

/// Fields whose repeated entries carry an explicit `PREF` order.
const PREF_FIELDS: &[&str] = &[fields::FN, fields::EMAIL, fields::TEL, fields::ADR, fields::KEY];

/// Fields that always get a group tag so related entries can bind to them.
const GROUPED_FIELDS: &[&str] = &[fields::EMAIL];

const GROUP_PREFIX: &str = "item";

/// Output of [`normalize_with_warnings`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub entries: Vec<AttributeEntry>,
    pub warnings: Vec<ValidationWarning>,
}

/// Normalizes raw entries, discarding warnings.
pub fn normalize(raw: impl IntoIterator<Item = AttributeEntry>) -> Vec<AttributeEntry> {
    normalize_with_warnings(raw).entries
}

/// Normalizes raw entries and reports every entry that was dropped.
pub fn normalize_with_warnings(raw: impl IntoIterator<Item = AttributeEntry>) -> Normalized {
    let mut warnings = Vec::new();
    let mut staged: Vec<(usize, AttributeEntry)> = Vec::new();

    for (position, entry) in raw.into_iter().enumerate() {
        let entry = tidy(entry);
        if entry.is(fields::VERSION) {
            warnings.push(ValidationWarning::VersionStripped { position });
            continue;
        }
        for piece in expand(entry) {
            let piece = shape(piece);
            match check(&piece) {
                Ok(()) => staged.push((position, piece)),
                Err(reason) => warnings.push(drop_warning(&piece, position, reason)),
            }
        }
    }

    let mut seen = HashSet::new();
    let mut singles = HashSet::new();
    let mut entries = Vec::with_capacity(staged.len());
    for (position, entry) in staged {
        let key = (entry.field.clone(), entry.value.clone(), entry.kind.clone());
        let first_single =
            !SINGLE_FIELDS.contains(&entry.field.as_str()) || singles.insert(entry.field.clone());
        if first_single && seen.insert(key) {
            entries.push(entry);
        } else {
            warnings.push(ValidationWarning::Duplicate {
                field: entry.field.to_string(),
                position,
            });
        }
    }

    let entries = assign_groups(assign_preferences(entries));

    for warning in &warnings {
        debug!("normalize: {}", warning);
    }

    Normalized { entries, warnings }
}

/// Canonical field name, trimmed value components and parameters.
fn tidy(mut entry: AttributeEntry) -> AttributeEntry {
    entry.field = entry.field.canonical();
    entry.value = match entry.value {
        PropertyValue::Single(value) => PropertyValue::Single(value.trim().to_string()),
        PropertyValue::Multiple(values) => {
            PropertyValue::Multiple(values.iter().map(|v| v.trim().to_string()).collect())
        }
    };
    entry.group = non_empty(entry.group);
    entry.kind = non_empty(entry.kind);
    entry
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Splits list fields into one entry per value.
fn expand(entry: AttributeEntry) -> Vec<AttributeEntry> {
    if !LIST_FIELDS.contains(&entry.field.as_str()) {
        return vec![entry];
    }
    let values: Vec<String> = match &entry.value {
        PropertyValue::Single(value) => value.split(',').map(|v| v.trim().to_string()).collect(),
        PropertyValue::Multiple(values) => values.clone(),
    };
    let pieces: Vec<AttributeEntry> = values
        .into_iter()
        .filter(|v| !v.is_empty())
        .map(|value| AttributeEntry {
            value: PropertyValue::Single(value),
            ..entry.clone()
        })
        .collect();
    if pieces.is_empty() {
        // Keep one blank entry so the drop is reported.
        vec![entry]
    } else {
        pieces
    }
}

/// Brings the value into the shape its field expects.
fn shape(mut entry: AttributeEntry) -> AttributeEntry {
    let structured = STRUCTURED_FIELDS
        .iter()
        .find(|(name, _, _)| entry.field.is(name));

    entry.value = match (structured, entry.value) {
        (Some(&(_, count, primary)), PropertyValue::Single(value)) => {
            let mut parts: Vec<String> = if value.contains(';') {
                value.split(';').map(|p| p.trim().to_string()).collect()
            } else {
                let mut parts = vec![String::new(); count];
                parts[primary] = value;
                parts
            };
            parts.resize(count, String::new());
            PropertyValue::Multiple(parts)
        }
        (Some(&(_, count, _)), PropertyValue::Multiple(mut parts)) => {
            parts.resize(count, String::new());
            PropertyValue::Multiple(parts)
        }
        (None, PropertyValue::Multiple(parts)) => {
            let mut parts: Vec<String> = parts.into_iter().filter(|p| !p.is_empty()).collect();
            if parts.len() == 1 {
                PropertyValue::Single(parts.remove(0))
            } else {
                PropertyValue::Multiple(parts)
            }
        }
        (None, single) => single,
    };
    entry
}

enum DropReason {
    Empty,
    Invalid(&'static str),
}

fn check(entry: &AttributeEntry) -> Result<(), DropReason> {
    if entry.value.is_blank() {
        return Err(DropReason::Empty);
    }
    if entry.is(fields::EMAIL) {
        match entry.value.as_single() {
            Some(address) if is_email(address) => {}
            Some(_) => return Err(DropReason::Invalid("not an email address")),
            None => return Err(DropReason::Invalid("email cannot be multi-valued")),
        }
    }
    Ok(())
}

fn is_email(address: &str) -> bool {
    EmailAddress::parse_with_options(address, Default::default()).is_ok()
}

fn drop_warning(entry: &AttributeEntry, position: usize, reason: DropReason) -> ValidationWarning {
    let field = entry.field.to_string();
    match reason {
        DropReason::Empty => ValidationWarning::EmptyValue { field, position },
        DropReason::Invalid(reason) => ValidationWarning::InvalidValue {
            field,
            position,
            reason,
        },
    }
}

/// Reorders each preference field within the slots it occupies and
/// numbers its entries 1..n. Entries without a preference sort last;
/// input order breaks ties.
fn assign_preferences(mut entries: Vec<AttributeEntry>) -> Vec<AttributeEntry> {
    for field in PREF_FIELDS {
        let slots: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is(field))
            .map(|(idx, _)| idx)
            .collect();
        if slots.is_empty() {
            continue;
        }

        let mut ordered: Vec<AttributeEntry> = slots.iter().map(|&i| entries[i].clone()).collect();
        ordered.sort_by_key(|entry| entry.preference.unwrap_or(u32::MAX));

        for (rank, (slot, mut entry)) in slots.into_iter().zip(ordered).enumerate() {
            entry.preference = Some(rank as u32 + 1);
            entries[slot] = entry;
        }
    }
    entries
}

/// Renames existing groups to `item1`, `item2`, ... in order of first
/// appearance and gives grouped fields without a tag a fresh one.
fn assign_groups(entries: Vec<AttributeEntry>) -> Vec<AttributeEntry> {
    let mut renamed: HashMap<String, String> = HashMap::new();
    let mut next = 0usize;
    let mut fresh = || {
        next += 1;
        format!("{GROUP_PREFIX}{next}")
    };

    entries
        .into_iter()
        .map(|mut entry| {
            entry.group = match entry.group.take() {
                Some(source) => Some(renamed.entry(source).or_insert_with(&mut fresh).clone()),
                None if GROUPED_FIELDS.contains(&entry.field.as_str()) => Some(fresh()),
                None => None,
            };
            entry
        })
        .collect()
}
