//! vCard reader for the text [`crate::serialize`] produces.

use contactseal_types::{AttributeEntry, FieldName, PropertyValue};

use crate::error::{VcardError, VcardResult};
use crate::escape::{split_unescaped, unescape_text};

/// Parses one vCard into entries.
///
/// `BEGIN`/`END` are skipped; `VERSION` comes back as a `version` entry.
/// Parameters other than `TYPE` and `PREF` are ignored.
pub fn parse(text: &str) -> VcardResult<Vec<AttributeEntry>> {
    let mut entries = Vec::new();
    for (line_no, line) in unfold(text) {
        if let Some(entry) = parse_line(line_no, &line)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Joins folded continuation lines, returning each logical line with the
/// 1-based number of its first physical line.
fn unfold(text: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();
    for (idx, raw) in text.split('\n').enumerate() {
        let physical = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(rest) = physical
            .strip_prefix(' ')
            .or_else(|| physical.strip_prefix('\t'))
        {
            if let Some((_, last)) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        if physical.is_empty() {
            continue;
        }
        lines.push((idx + 1, physical.to_string()));
    }
    lines
}

fn parse_line(line_no: usize, line: &str) -> VcardResult<Option<AttributeEntry>> {
    let malformed = |reason: &str| VcardError::Malformed {
        line: line_no,
        reason: reason.to_string(),
    };

    let colon = find_value_colon(line).ok_or_else(|| malformed("missing ':'"))?;
    let (head, value) = (&line[..colon], &line[colon + 1..]);

    let mut params = head.split(';');
    let qualified = params.next().unwrap_or_default();
    let (group, name) = match qualified.split_once('.') {
        Some((group, name)) => (Some(group), name),
        None => (None, qualified),
    };
    if name.is_empty() {
        return Err(malformed("empty property name"));
    }
    let name = name.to_ascii_lowercase();
    if name == "begin" || name == "end" {
        return Ok(None);
    }

    let mut entry = AttributeEntry::new(FieldName::new(name), parse_value(value));
    entry.group = group.filter(|g| !g.is_empty()).map(str::to_string);

    for param in params {
        let Some((key, raw)) = param.split_once('=') else {
            continue;
        };
        let raw = raw.trim_matches('"');
        if key.eq_ignore_ascii_case("type") {
            entry.kind = Some(raw.to_string());
        } else if key.eq_ignore_ascii_case("pref") {
            let pref = raw
                .parse::<u32>()
                .map_err(|_| malformed("PREF is not a positive integer"))?;
            entry.preference = Some(pref);
        }
    }

    Ok(Some(entry))
}

fn parse_value(raw: &str) -> PropertyValue {
    let parts = split_unescaped(raw, ';');
    if parts.len() > 1 {
        PropertyValue::Multiple(parts.into_iter().map(unescape_text).collect())
    } else {
        PropertyValue::Single(unescape_text(raw))
    }
}

/// Position of the first `:` outside a quoted parameter value.
fn find_value_colon(line: &str) -> Option<usize> {
    let mut quoted = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            ':' if !quoted => return Some(idx),
            _ => {}
        }
    }
    None
}
