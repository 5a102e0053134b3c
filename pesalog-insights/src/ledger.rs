//! Reference-code bookkeeping over a parsed batch: duplicate detection
//! for idempotent re-processing, and reversal-to-original linkage.
//!
//! The parser records a reversal's target code but does not validate it;
//! cross-referencing is this caller-side facility.

use pesalog_core::{ParsedTransaction, TransactionType};
use std::collections::HashMap;

/// Index of first-seen reference codes over a batch, by record position.
/// Reversals are excluded: their reference names the transaction they
/// undo, not themselves.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    first_seen: HashMap<String, usize>,
    duplicates: Vec<usize>,
}

impl ReferenceIndex {
    pub fn build(records: &[ParsedTransaction]) -> Self {
        let mut index = ReferenceIndex::default();
        for (i, record) in records.iter().enumerate() {
            if record.transaction_type == TransactionType::Reversal {
                continue;
            }
            let Some(reference) = &record.reference_code else {
                continue;
            };
            if index.first_seen.contains_key(reference) {
                index.duplicates.push(i);
            } else {
                index.first_seen.insert(reference.clone(), i);
            }
        }
        index
    }

    /// Position of the first record carrying this reference.
    pub fn get(&self, reference: &str) -> Option<usize> {
        self.first_seen.get(reference).copied()
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.first_seen.contains_key(reference)
    }

    /// Positions of records whose reference was already seen earlier in
    /// the batch — re-deliveries to skip on re-processing.
    pub fn duplicates(&self) -> &[usize] {
        &self.duplicates
    }
}

/// Link each reversal to the original it undoes: `(reversal_position,
/// original_position)`, `None` when the referenced code was never seen.
pub fn link_reversals(records: &[ParsedTransaction]) -> Vec<(usize, Option<usize>)> {
    let index = ReferenceIndex::build(records);
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.transaction_type == TransactionType::Reversal)
        .map(|(i, r)| {
            let original = r
                .reference_code
                .as_deref()
                .and_then(|reference| index.get(reference));
            (i, original)
        })
        .collect()
}
