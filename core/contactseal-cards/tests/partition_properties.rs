//! Property-based tests for the partitioner.
//!
//! - Without `categories` there is no clear-text tier
//! - Every entry lands in at least one tier and never in all three
//! - Buckets overlap only on dual-classified fields
//! - Each bucket keeps the relative input order

mod common;

use common::dual_categories_classification;
use contactseal_cards::{partition, FieldClassification};
use contactseal_types::AttributeEntry;
use proptest::prelude::*;

const FIELD_POOL: &[&str] = &[
    "fn", "uid", "email", "categories", "note", "tel", "prodid", "version", "org", "adr",
];

/// Entries with unique values so each can be traced through the buckets.
fn entries_strategy() -> impl Strategy<Value = Vec<AttributeEntry>> {
    prop::collection::vec(prop::sample::select(FIELD_POOL), 0..24).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| AttributeEntry::new(name, format!("v{i}")))
            .collect()
    })
}

fn classification_strategy() -> impl Strategy<Value = FieldClassification> {
    prop_oneof![
        Just(FieldClassification::default()),
        Just(dual_categories_classification()),
        (
            prop::sample::subsequence(FIELD_POOL, 0..FIELD_POOL.len()),
            prop::sample::subsequence(FIELD_POOL, 0..FIELD_POOL.len()),
        )
            .prop_map(|(clear, signed)| FieldClassification::new(clear, signed)),
    ]
}

fn is_subsequence(bucket: &[AttributeEntry], input: &[AttributeEntry]) -> bool {
    let mut rest = input.iter();
    bucket.iter().all(|wanted| rest.any(|e| e == wanted))
}

proptest! {
    #[test]
    fn no_categories_no_clear_text(
        entries in entries_strategy(),
        classification in classification_strategy()
    ) {
        let entries: Vec<_> = entries.into_iter().filter(|e| !e.is("categories")).collect();
        let parts = partition(&entries, &classification);
        prop_assert!(parts.to_clear_text.is_empty());
        prop_assert_eq!(parts.total_len(), entries.len());
    }

    #[test]
    fn every_entry_lands_somewhere_but_not_everywhere(
        entries in entries_strategy(),
        classification in classification_strategy()
    ) {
        let parts = partition(&entries, &classification);
        for entry in &entries {
            let hits = [&parts.to_encrypt_and_sign, &parts.to_sign, &parts.to_clear_text]
                .iter()
                .filter(|bucket| bucket.contains(entry))
                .count();
            prop_assert!(hits >= 1);
            prop_assert!(hits <= 2);
            if hits == 2 {
                prop_assert!(classification.is_dual(&entry.field));
                prop_assert!(parts.to_clear_text.contains(entry));
                prop_assert!(parts.to_sign.contains(entry));
            }
        }
    }

    #[test]
    fn total_equals_input_plus_overlap(
        entries in entries_strategy(),
        classification in classification_strategy()
    ) {
        let parts = partition(&entries, &classification);
        let overlap = parts
            .to_clear_text
            .iter()
            .filter(|e| parts.to_sign.contains(e))
            .count();
        prop_assert!(parts.total_len() >= entries.len());
        prop_assert_eq!(parts.total_len(), entries.len() + overlap);
    }

    #[test]
    fn buckets_preserve_input_order(
        entries in entries_strategy(),
        classification in classification_strategy()
    ) {
        let parts = partition(&entries, &classification);
        prop_assert!(is_subsequence(&parts.to_encrypt_and_sign, &entries));
        prop_assert!(is_subsequence(&parts.to_sign, &entries));
        prop_assert!(is_subsequence(&parts.to_clear_text, &entries));
    }
}
