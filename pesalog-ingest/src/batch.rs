//! Batch parsing: an order-preserving map over raw messages plus
//! aggregate counts for coverage reporting.

use std::collections::HashMap;

use pesalog_core::{ParseStatus, ParsedTransaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::parser::parse_message;
use crate::types::RawMessage;

/// Aggregate counts over a parsed batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub by_type: HashMap<TransactionType, usize>,
    pub by_status: HashMap<ParseStatus, usize>,
    /// Sum of extracted amounts (recognized records only).
    pub total_amount: Decimal,
}

impl BatchSummary {
    pub fn observe(&mut self, record: &ParsedTransaction) {
        self.total += 1;
        *self.by_type.entry(record.transaction_type).or_insert(0) += 1;
        *self.by_status.entry(record.parse_status).or_insert(0) += 1;
        if let Some(amount) = record.amount {
            self.total_amount += amount;
        }
    }

    pub fn count_for(&self, kind: TransactionType) -> usize {
        self.by_type.get(&kind).copied().unwrap_or(0)
    }

    pub fn status_count(&self, status: ParseStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// A parsed batch: one record per input message, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub records: Vec<ParsedTransaction>,
    pub summary: BatchSummary,
}

/// Lazily parse messages, one output per input, preserving order.
///
/// A message that fails outright (blank text) yields an `unknown` record
/// in place; the batch never aborts.
pub fn parse_iter<I>(messages: I) -> impl Iterator<Item = ParsedTransaction>
where
    I: IntoIterator<Item = RawMessage>,
{
    messages.into_iter().map(|message| {
        parse_message(&message.text, message.received_at)
            .unwrap_or_else(|_| ParsedTransaction::unknown(message.text))
    })
}

/// Parse a whole batch and tally per-type / per-status counts.
pub fn parse_batch<I>(messages: I) -> BatchResult
where
    I: IntoIterator<Item = RawMessage>,
{
    let mut summary = BatchSummary::default();
    let records: Vec<ParsedTransaction> = parse_iter(messages)
        .inspect(|record| summary.observe(record))
        .collect();
    BatchResult { records, summary }
}
