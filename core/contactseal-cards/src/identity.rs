use contactseal_types::{fields, AttributeEntry, ContactUid};

/// Returns `bucket` with exactly one `uid` and at least one `fn`.
///
/// A fresh `uid` and a placeholder `fn` are appended where missing; extra
/// `uid` entries after the first are dropped. Field names match in
/// canonical form. Applying this twice changes nothing.
pub fn with_default_identity(bucket: &[AttributeEntry], display_name: &str) -> Vec<AttributeEntry> {
    let mut has_uid = false;
    let mut has_fn = false;
    let mut out = Vec::with_capacity(bucket.len() + 2);

    for entry in bucket {
        let field = entry.field.canonical();
        if field.is(fields::UID) {
            if has_uid {
                continue;
            }
            has_uid = true;
        }
        has_fn |= field.is(fields::FN);
        out.push(entry.clone());
    }

    if !has_uid {
        out.push(AttributeEntry::new(fields::UID, ContactUid::new().to_string()));
    }
    if !has_fn {
        out.push(AttributeEntry::new(fields::FN, display_name));
    }
    out
}
